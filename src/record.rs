//! Feature assembly: form inputs to a single-row feature record.
//!
//! The column names and order below are the contract with the trained model,
//! including the misspelled `average_montly_hours`. Categorical columns are
//! tagged by position (7 and 8), not by name. That positional coupling must
//! stay in step with the artifact: renaming or reordering columns here breaks
//! inference for every existing model.

use std::fmt;
use std::str::FromStr;

/// Column names, in the order the model was trained on.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "satisfaction_level",
    "last_evaluation",
    "number_project",
    "average_montly_hours",
    "time_spend_company",
    "Work_accident",
    "promotion_last_5years",
    "Department",
    "salary",
];

/// Positions of the categorical columns (`Department`, `salary`).
pub const CATEGORICAL_POSITIONS: [usize; 2] = [7, 8];

// =============================================================================
// Categorical inputs
// =============================================================================

/// Error returned when parsing an unknown department or salary label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

/// Department the employee works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Department {
    #[default]
    Sales,
    Technical,
    Support,
    It,
    Hr,
    Marketing,
    ProductMng,
    RandD,
    Accounting,
}

impl Department {
    /// All departments, in form order.
    pub const ALL: [Department; 9] = [
        Department::Sales,
        Department::Technical,
        Department::Support,
        Department::It,
        Department::Hr,
        Department::Marketing,
        Department::ProductMng,
        Department::RandD,
        Department::Accounting,
    ];

    /// Label as seen by the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Technical => "technical",
            Department::Support => "support",
            Department::It => "IT",
            Department::Hr => "hr",
            Department::Marketing => "marketing",
            Department::ProductMng => "product_mng",
            Department::RandD => "RandD",
            Department::Accounting => "accounting",
        }
    }
}

impl FromStr for Department {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "department",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SalaryLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl SalaryLevel {
    /// All salary bands, in form order.
    pub const ALL: [SalaryLevel; 3] = [SalaryLevel::Low, SalaryLevel::Medium, SalaryLevel::High];

    /// Label as seen by the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryLevel::Low => "low",
            SalaryLevel::Medium => "medium",
            SalaryLevel::High => "high",
        }
    }
}

impl FromStr for SalaryLevel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "salary level",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SalaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Form inputs
// =============================================================================

/// The nine operator inputs.
///
/// Values are trusted to be within their documented domains; range checks
/// belong to whatever collects them.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFeatures {
    /// Satisfaction level in `[0, 1]`.
    pub satisfaction_level: f64,
    /// Last evaluation score in `[0, 1]`.
    pub last_evaluation: f64,
    /// Number of projects in `[1, 10]`.
    pub number_project: i64,
    /// Average monthly hours in `[100, 400]`.
    pub average_monthly_hours: i64,
    /// Years at the company in `[1, 10]`.
    pub time_spend_company: i64,
    /// Work accident flag (0 or 1).
    pub work_accident: u8,
    /// Promotion in the last five years flag (0 or 1).
    pub promotion_last_5years: u8,
    pub department: Department,
    pub salary: SalaryLevel,
}

impl Default for EmployeeFeatures {
    /// Initial form state.
    fn default() -> Self {
        Self {
            satisfaction_level: 0.5,
            last_evaluation: 0.5,
            number_project: 3,
            average_monthly_hours: 200,
            time_spend_company: 3,
            work_accident: 0,
            promotion_last_5years: 0,
            department: Department::Sales,
            salary: SalaryLevel::Low,
        }
    }
}

// =============================================================================
// FeatureRecord
// =============================================================================

/// A single cell of a feature record.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Float(f64),
    Int(i64),
    Category(String),
}

impl FeatureValue {
    /// Numeric view of the value, `None` for categories.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Category(_) => None,
        }
    }

    /// Category label, `None` for numeric values.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Category(s) => f.write_str(s),
        }
    }
}

/// One row of named features plus the positions tagged as categorical.
///
/// Built fresh for every prediction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<String>,
    values: Vec<FeatureValue>,
    categorical_positions: Vec<usize>,
}

impl FeatureRecord {
    /// Build a record from arbitrary columns.
    ///
    /// No checks are made against any model; a mismatching record is rejected
    /// at inference time.
    pub fn from_columns<I, S>(columns: I, categorical_positions: &[usize]) -> Self
    where
        I: IntoIterator<Item = (S, FeatureValue)>,
        S: Into<String>,
    {
        let (columns, values) = columns
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .unzip();
        let mut categorical_positions = categorical_positions.to_vec();
        categorical_positions.sort_unstable();
        categorical_positions.dedup();
        Self {
            columns,
            values,
            categorical_positions,
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order.
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Positions tagged categorical, ascending and deduplicated.
    pub fn categorical_positions(&self) -> &[usize] {
        &self.categorical_positions
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Turn form inputs into the record layout the model was trained on.
pub fn assemble(input: &EmployeeFeatures) -> FeatureRecord {
    let values = [
        FeatureValue::Float(input.satisfaction_level),
        FeatureValue::Float(input.last_evaluation),
        FeatureValue::Int(input.number_project),
        FeatureValue::Int(input.average_monthly_hours),
        FeatureValue::Int(input.time_spend_company),
        FeatureValue::Int(i64::from(input.work_accident)),
        FeatureValue::Int(i64::from(input.promotion_last_5years)),
        FeatureValue::Category(input.department.as_str().to_string()),
        FeatureValue::Category(input.salary.as_str().to_string()),
    ];

    FeatureRecord::from_columns(FEATURE_COLUMNS.into_iter().zip(values), &CATEGORICAL_POSITIONS)
}
