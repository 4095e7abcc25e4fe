//! Interactive prediction form using ratatui
//!
//! Left pane lists the eleven inputs and a Predict action. The right side
//! shows the latest prediction above a persistent feature-importance chart.
//! Key handling lives in [`FormState::handle_key`], which never touches the
//! terminal, so the transitions can be tested directly.

use std::io::{self, stdout};
use std::ops::RangeInclusive;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::inference::{predict, AttritionClass, InferenceContext, Prediction, RankedFeature};
use crate::pipeline::{bounds, CategoricalColumn, EmployeeRecord};
use crate::report::{importance_bar, prediction_headline, NO_RULE_NOTICE};

const INCOME_STEP: u32 = 500;
const INCOME_PAGE_STEP: u32 = 5000;
const INCOME_MAX_DIGITS: usize = 6;

/// A row of the left pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Age,
    Department,
    JobRole,
    MonthlyIncome,
    PercentSalaryHike,
    JobSatisfaction,
    WorkLifeBalance,
    YearsAtCompany,
    OverTime,
    DistanceFromHome,
    WorkMode,
    Predict,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Age,
        FormField::Department,
        FormField::JobRole,
        FormField::MonthlyIncome,
        FormField::PercentSalaryHike,
        FormField::JobSatisfaction,
        FormField::WorkLifeBalance,
        FormField::YearsAtCompany,
        FormField::OverTime,
        FormField::DistanceFromHome,
        FormField::WorkMode,
        FormField::Predict,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Department => "Department",
            FormField::JobRole => "Job Role",
            FormField::MonthlyIncome => "Monthly Income",
            FormField::PercentSalaryHike => "Salary Hike %",
            FormField::JobSatisfaction => "Job Satisfaction",
            FormField::WorkLifeBalance => "Work-Life Balance",
            FormField::YearsAtCompany => "Years at Company",
            FormField::OverTime => "OverTime",
            FormField::DistanceFromHome => "Distance from Home",
            FormField::WorkMode => "Work Mode",
            FormField::Predict => "Predict",
        }
    }

    fn choice(self) -> Option<CategoricalColumn> {
        match self {
            FormField::Department => Some(CategoricalColumn::Department),
            FormField::JobRole => Some(CategoricalColumn::JobRole),
            FormField::OverTime => Some(CategoricalColumn::OverTime),
            FormField::WorkMode => Some(CategoricalColumn::WorkMode),
            _ => None,
        }
    }

    fn slider_range(self) -> Option<RangeInclusive<u32>> {
        match self {
            FormField::Age => Some(bounds::AGE),
            FormField::MonthlyIncome => Some(bounds::MONTHLY_INCOME),
            FormField::PercentSalaryHike => Some(bounds::PERCENT_SALARY_HIKE),
            FormField::JobSatisfaction => Some(bounds::JOB_SATISFACTION),
            FormField::WorkLifeBalance => Some(bounds::WORK_LIFE_BALANCE),
            FormField::YearsAtCompany => Some(bounds::YEARS_AT_COMPANY),
            FormField::DistanceFromHome => Some(bounds::DISTANCE_FROM_HOME),
            _ => None,
        }
    }

    fn step(self) -> u32 {
        if self == FormField::MonthlyIncome {
            INCOME_STEP
        } else {
            1
        }
    }
}

/// Current input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Browse,
    EditIncome { input: String },
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Predict,
    Quit,
}

/// Form state, independent of the terminal
#[derive(Debug, Clone)]
pub struct FormState {
    pub record: EmployeeRecord,
    pub selected: usize,
    pub mode: FormMode,
    /// Fitted labels per categorical column, in `CategoricalColumn::ALL` order
    vocabularies: [Vec<String>; 4],
    pub prediction: Option<Prediction>,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(record: EmployeeRecord, vocabularies: [Vec<String>; 4]) -> Self {
        Self {
            record,
            selected: 0,
            mode: FormMode::Browse,
            vocabularies,
            prediction: None,
            error: None,
        }
    }

    /// Start from the context's default record and fitted vocabularies
    pub fn from_context(context: &InferenceContext) -> Self {
        let vocabularies = CategoricalColumn::ALL.map(|c| context.vocabulary(c).to_vec());
        Self::new(context.default_record(), vocabularies)
    }

    pub fn field(&self) -> FormField {
        FormField::ALL[self.selected]
    }

    /// Display value of a field
    pub fn value(&self, field: FormField) -> String {
        let r = &self.record;
        match field {
            FormField::Age => r.age.to_string(),
            FormField::Department => r.department.clone(),
            FormField::JobRole => r.job_role.clone(),
            FormField::MonthlyIncome => r.monthly_income.to_string(),
            FormField::PercentSalaryHike => r.percent_salary_hike.to_string(),
            FormField::JobSatisfaction => r.job_satisfaction.to_string(),
            FormField::WorkLifeBalance => r.work_life_balance.to_string(),
            FormField::YearsAtCompany => r.years_at_company.to_string(),
            FormField::OverTime => r.over_time.clone(),
            FormField::DistanceFromHome => r.distance_from_home.to_string(),
            FormField::WorkMode => r.work_mode.clone(),
            FormField::Predict => String::new(),
        }
    }

    fn slider_mut(&mut self, field: FormField) -> Option<&mut u32> {
        let r = &mut self.record;
        match field {
            FormField::Age => Some(&mut r.age),
            FormField::MonthlyIncome => Some(&mut r.monthly_income),
            FormField::PercentSalaryHike => Some(&mut r.percent_salary_hike),
            FormField::JobSatisfaction => Some(&mut r.job_satisfaction),
            FormField::WorkLifeBalance => Some(&mut r.work_life_balance),
            FormField::YearsAtCompany => Some(&mut r.years_at_company),
            FormField::DistanceFromHome => Some(&mut r.distance_from_home),
            _ => None,
        }
    }

    fn choice_mut(&mut self, column: CategoricalColumn) -> &mut String {
        let r = &mut self.record;
        match column {
            CategoricalColumn::Department => &mut r.department,
            CategoricalColumn::JobRole => &mut r.job_role,
            CategoricalColumn::OverTime => &mut r.over_time,
            CategoricalColumn::WorkMode => &mut r.work_mode,
        }
    }

    fn vocabulary(&self, column: CategoricalColumn) -> &[String] {
        let i = CategoricalColumn::ALL
            .iter()
            .position(|c| *c == column)
            .unwrap_or(0);
        &self.vocabularies[i]
    }

    /// Move a slider by `delta` steps, clamped to its range
    fn nudge(&mut self, field: FormField, delta: i64, step: u32) {
        let Some(range) = field.slider_range() else {
            return;
        };
        if let Some(value) = self.slider_mut(field) {
            let next = i64::from(*value) + delta * i64::from(step);
            let clamped = next.clamp(i64::from(*range.start()), i64::from(*range.end()));
            *value = clamped as u32;
        }
    }

    /// Cycle a choice widget through the fitted vocabulary
    fn cycle(&mut self, column: CategoricalColumn, forward: bool) {
        let vocab = self.vocabulary(column).to_vec();
        if vocab.is_empty() {
            return;
        }
        let current = self.choice_mut(column);
        let pos = vocab.iter().position(|v| v == current);
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % vocab.len(),
            (Some(i), false) => (i + vocab.len() - 1) % vocab.len(),
        };
        *current = vocab[next].clone();
    }

    fn adjust(&mut self, forward: bool) {
        let field = self.field();
        if let Some(column) = field.choice() {
            self.cycle(column, forward);
        } else {
            self.nudge(field, if forward { 1 } else { -1 }, field.step());
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match &mut self.mode {
            FormMode::EditIncome { input } => {
                match key {
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if input.len() < INCOME_MAX_DIGITS {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Enter => {
                        let range = bounds::MONTHLY_INCOME;
                        match input.parse::<u32>() {
                            Ok(v) if range.contains(&v) => {
                                self.record.monthly_income = v;
                                self.error = None;
                                self.mode = FormMode::Browse;
                            }
                            _ => {
                                self.error = Some(format!(
                                    "Monthly income must be between {} and {}",
                                    range.start(),
                                    range.end()
                                ));
                            }
                        }
                    }
                    KeyCode::Esc => {
                        self.error = None;
                        self.mode = FormMode::Browse;
                    }
                    _ => {}
                }
                FormAction::None
            }
            FormMode::Browse => match key {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => FormAction::Quit,
                KeyCode::Char('p') | KeyCode::Char('P') => FormAction::Predict,
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    FormAction::None
                }
                KeyCode::Down => {
                    self.selected = (self.selected + 1).min(FormField::ALL.len() - 1);
                    FormAction::None
                }
                KeyCode::Left => {
                    self.adjust(false);
                    FormAction::None
                }
                KeyCode::Right => {
                    self.adjust(true);
                    FormAction::None
                }
                KeyCode::PageUp if self.field() == FormField::MonthlyIncome => {
                    self.nudge(FormField::MonthlyIncome, 1, INCOME_PAGE_STEP);
                    FormAction::None
                }
                KeyCode::PageDown if self.field() == FormField::MonthlyIncome => {
                    self.nudge(FormField::MonthlyIncome, -1, INCOME_PAGE_STEP);
                    FormAction::None
                }
                KeyCode::Enter => match self.field() {
                    FormField::Predict => FormAction::Predict,
                    FormField::MonthlyIncome => {
                        self.mode = FormMode::EditIncome {
                            input: self.record.monthly_income.to_string(),
                        };
                        FormAction::None
                    }
                    _ => FormAction::None,
                },
                _ => FormAction::None,
            },
        }
    }

    /// Score the current record and store the outcome
    pub fn run_prediction(&mut self, context: &InferenceContext) {
        match predict(context, &self.record) {
            Ok(p) => {
                self.prediction = Some(p);
                self.error = None;
            }
            Err(e) => {
                self.prediction = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Run the interactive form until the user quits
pub fn run_prediction_form(context: &InferenceContext) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_form_loop(&mut terminal, context);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_form_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    context: &InferenceContext,
) -> Result<()> {
    let mut state = FormState::from_context(context);
    let ranking = context.feature_ranking();

    loop {
        terminal.draw(|frame| draw_ui(frame, &state, &ranking))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match state.handle_key(key.code) {
                FormAction::Quit => return Ok(()),
                FormAction::Predict => state.run_prediction(context),
                FormAction::None => {}
            }
        }
    }
}

fn draw_ui(frame: &mut Frame, state: &FormState, ranking: &[RankedFeature]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(frame.area());

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    draw_fields(frame, state, columns[0]);
    draw_result(frame, state, right[0]);
    draw_importance(frame, ranking, right[1]);

    if let FormMode::EditIncome { input } = &state.mode {
        draw_income_popup(frame, input, state.error.as_deref());
    }
}

fn draw_fields(frame: &mut Frame, state: &FormState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Employee Profile ")
        .title_style(Style::default().fg(Color::Cyan).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let items: Vec<ListItem> = FormField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.selected;
            if *field == FormField::Predict {
                let style = if selected {
                    Style::default().fg(Color::Black).bg(Color::Green).bold()
                } else {
                    Style::default().fg(Color::Green).bold()
                };
                return ListItem::new(format!("  [ {} ]", field.label())).style(style);
            }

            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                "  {:<20} ◀ {} ▶",
                field.label(),
                state.value(*field)
            ))
            .style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(List::new(items), chunks[0], &mut list_state);

    let help_text = Line::from(vec![
        Span::styled("  ↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" move  ", Style::default().fg(Color::DarkGray)),
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::styled(" adjust  ", Style::default().fg(Color::DarkGray)),
        Span::styled("P", Style::default().fg(Color::Cyan)),
        Span::styled(" predict  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Q", Style::default().fg(Color::Cyan)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[1]);
}

fn draw_result(frame: &mut Frame, state: &FormState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Prediction ")
        .title_style(Style::default().fg(Color::Yellow).bold());

    let mut lines = vec![Line::from("")];
    match (&state.prediction, &state.error) {
        (_, Some(err)) if state.mode == FormMode::Browse => {
            lines.push(Line::from(Span::styled(
                format!("  {}", err),
                Style::default().fg(Color::Red),
            )));
        }
        (Some(p), _) => {
            let color = match p.class {
                AttritionClass::Leave => Color::Red,
                AttritionClass::Stay => Color::Green,
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", prediction_headline(p)),
                Style::default().fg(color).bold(),
            )));
            lines.push(Line::from(""));
            if p.has_no_matching_rule() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", NO_RULE_NOTICE),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for s in &p.suggestions {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(Color::Cyan)),
                    Span::raw(*s),
                ]));
            }
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "  Adjust the profile and press P to predict.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_importance(frame: &mut Frame, ranking: &[RankedFeature], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Feature Importance ")
        .title_style(Style::default().fg(Color::Magenta).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name_width = ranking.iter().map(|r| r.feature.len()).max().unwrap_or(0);
    let bar_width = (inner.width as usize).saturating_sub(name_width + 10);
    let max = ranking.iter().map(|r| r.importance).fold(0.0, f64::max);

    let lines: Vec<Line> = ranking
        .iter()
        .map(|r| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$} ", r.feature, width = name_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    importance_bar(r.importance, max, bar_width),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    format!(" {:.3}", r.importance),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_income_popup(frame: &mut Frame, input: &str, error: Option<&str>) {
    let area = frame.area();

    let popup_width = 45u16;
    let popup_height = 8u16;
    let x = area.width.saturating_sub(popup_width) / 2;
    let y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect::new(
        x,
        y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Monthly Income ")
        .title_style(Style::default().fg(Color::Yellow).bold());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Value: ", Style::default().fg(Color::DarkGray)),
            Span::styled(input.to_string(), Style::default().fg(Color::White).bold()),
            Span::styled("▌", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            format!("  {}", error.unwrap_or("")),
            Style::default().fg(Color::Red),
        )),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" to confirm, ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::styled(" to cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(content), inner);
}
