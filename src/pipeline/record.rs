//! Employee record: the raw, pre-encoding input to the model

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::AttritionError;

/// Input domains offered by the form and the `predict` flags
pub mod bounds {
    use std::ops::RangeInclusive;

    pub const AGE: RangeInclusive<u32> = 18..=60;
    pub const MONTHLY_INCOME: RangeInclusive<u32> = 1000..=200_000;
    pub const PERCENT_SALARY_HIKE: RangeInclusive<u32> = 0..=50;
    pub const JOB_SATISFACTION: RangeInclusive<u32> = 1..=4;
    pub const WORK_LIFE_BALANCE: RangeInclusive<u32> = 1..=4;
    pub const YEARS_AT_COMPANY: RangeInclusive<u32> = 0..=40;
    pub const DISTANCE_FROM_HOME: RangeInclusive<u32> = 0..=60;
}

/// Starting values of the numeric inputs
pub mod defaults {
    pub const AGE: u32 = 30;
    pub const MONTHLY_INCOME: u32 = 5000;
    pub const PERCENT_SALARY_HIKE: u32 = 15;
    pub const JOB_SATISFACTION: u32 = 3;
    pub const WORK_LIFE_BALANCE: u32 = 3;
    pub const YEARS_AT_COMPANY: u32 = 5;
    pub const DISTANCE_FROM_HOME: u32 = 10;
}

/// One employee, eleven model inputs, raw values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    pub age: u32,
    pub department: String,
    pub job_role: String,
    pub monthly_income: u32,
    pub percent_salary_hike: u32,
    pub job_satisfaction: u32,
    pub work_life_balance: u32,
    pub years_at_company: u32,
    pub over_time: String,
    pub distance_from_home: u32,
    pub work_mode: String,
}

impl EmployeeRecord {
    /// Record with the default numeric inputs and the given categories
    pub fn with_categories(
        department: impl Into<String>,
        job_role: impl Into<String>,
        over_time: impl Into<String>,
        work_mode: impl Into<String>,
    ) -> Self {
        Self {
            age: defaults::AGE,
            department: department.into(),
            job_role: job_role.into(),
            monthly_income: defaults::MONTHLY_INCOME,
            percent_salary_hike: defaults::PERCENT_SALARY_HIKE,
            job_satisfaction: defaults::JOB_SATISFACTION,
            work_life_balance: defaults::WORK_LIFE_BALANCE,
            years_at_company: defaults::YEARS_AT_COMPANY,
            over_time: over_time.into(),
            distance_from_home: defaults::DISTANCE_FROM_HOME,
            work_mode: work_mode.into(),
        }
    }

    /// Check every numeric field against its input domain.
    ///
    /// Categorical fields are checked against the fitted vocabulary when the
    /// record is encoded.
    pub fn validate(&self) -> Result<(), AttritionError> {
        check("Age", self.age, bounds::AGE)?;
        check("MonthlyIncome", self.monthly_income, bounds::MONTHLY_INCOME)?;
        check(
            "PercentSalaryHike",
            self.percent_salary_hike,
            bounds::PERCENT_SALARY_HIKE,
        )?;
        check("JobSatisfaction", self.job_satisfaction, bounds::JOB_SATISFACTION)?;
        check("WorkLifeBalance", self.work_life_balance, bounds::WORK_LIFE_BALANCE)?;
        check("YearsAtCompany", self.years_at_company, bounds::YEARS_AT_COMPANY)?;
        check(
            "DistanceFromHome",
            self.distance_from_home,
            bounds::DISTANCE_FROM_HOME,
        )?;
        Ok(())
    }
}

fn check(field: &'static str, value: u32, range: RangeInclusive<u32>) -> Result<(), AttritionError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AttritionError::input(
            field,
            format!(
                "{} is outside the allowed range {}-{}",
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}
