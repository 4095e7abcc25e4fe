//! Rule-based retention suggestions
//!
//! Rules are evaluated on the raw record, in table order, and only for
//! records predicted to leave.

use crate::pipeline::EmployeeRecord;

use super::predict::AttritionClass;

/// Message shown for records predicted to stay
pub const MONITOR_MESSAGE: &str = "Employee is stable. Continue monitoring and engagement.";

/// A predicate on the raw record and the suggestion it triggers
#[derive(Debug, Clone, Copy)]
pub struct RetentionRule {
    pub name: &'static str,
    pub applies: fn(&EmployeeRecord) -> bool,
    pub message: &'static str,
}

/// Retention rules in evaluation order
pub const RETENTION_RULES: [RetentionRule; 4] = [
    RetentionRule {
        name: "overtime",
        applies: |r| r.over_time == "Yes",
        message: "Reduce overtime workload or offer flexible hours.",
    },
    RetentionRule {
        name: "work-life balance",
        applies: |r| r.work_life_balance < 3,
        message: "Improve work-life balance via remote/hybrid options or wellness programs.",
    },
    RetentionRule {
        name: "engagement",
        applies: |r| r.job_satisfaction < 3,
        message: "Engage with the employee to understand dissatisfaction and provide incentives.",
    },
    RetentionRule {
        name: "mentorship",
        applies: |r| r.years_at_company < 2,
        message: "Provide mentorship and onboarding support for newer employees.",
    },
];

/// Suggestions for a record given its predicted class.
///
/// A leave prediction where no rule fires yields an empty list.
pub fn retention_suggestions(record: &EmployeeRecord, class: AttritionClass) -> Vec<&'static str> {
    match class {
        AttritionClass::Stay => vec![MONITOR_MESSAGE],
        AttritionClass::Leave => RETENTION_RULES
            .iter()
            .filter(|rule| (rule.applies)(record))
            .map(|rule| rule.message)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            age: 30,
            department: "Sales".to_string(),
            job_role: "Sales Executive".to_string(),
            monthly_income: 5000,
            percent_salary_hike: 15,
            job_satisfaction: 3,
            work_life_balance: 3,
            years_at_company: 5,
            over_time: "No".to_string(),
            distance_from_home: 10,
            work_mode: "Hybrid".to_string(),
        }
    }

    #[test]
    fn test_stay_gets_monitor_message_only() {
        let mut r = record();
        r.over_time = "Yes".to_string();
        r.job_satisfaction = 1;
        assert_eq!(retention_suggestions(&r, AttritionClass::Stay), vec![MONITOR_MESSAGE]);
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let r = EmployeeRecord {
            over_time: "Yes".to_string(),
            work_life_balance: 1,
            job_satisfaction: 1,
            years_at_company: 1,
            ..record()
        };
        let expected: Vec<&str> = RETENTION_RULES.iter().map(|r| r.message).collect();
        assert_eq!(retention_suggestions(&r, AttritionClass::Leave), expected);
    }

    #[test]
    fn test_leave_without_triggers_is_empty() {
        assert!(retention_suggestions(&record(), AttritionClass::Leave).is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let r = EmployeeRecord {
            work_life_balance: 2,
            years_at_company: 2,
            ..record()
        };
        assert_eq!(
            retention_suggestions(&r, AttritionClass::Leave),
            vec![RETENTION_RULES[1].message]
        );
    }
}
