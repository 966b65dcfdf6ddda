//! Command-line form for a single churn prediction.
//!
//! Each input is bounded by its parser the way a form widget bounds it, and
//! starts from the same default. Running the binary is the "predict" action:
//!
//! `churn-predict --satisfaction-level 0.38 --last-evaluation 0.53 --number-project 2 \
//!     --average-monthly-hours 157 --department sales --salary low`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use log::{info, warn};

use churn_predict::report::{DESCRIPTION, FAILURE_MESSAGE, Severity, TITLE, Verdict};
use churn_predict::{
    DEFAULT_MODEL_PATH, Department, EmployeeFeatures, SalaryLevel, predict_employee, shared_model,
};

#[derive(Parser, Debug)]
#[command(author, version, about = DESCRIPTION, long_about = None)]
struct Cli {
    /// Classifier artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Satisfaction level, 0.0 to 1.0 in steps of 0.01
    #[arg(long, default_value_t = 0.5, value_parser = unit_interval)]
    satisfaction_level: f64,

    /// Last evaluation score, 0.0 to 1.0 in steps of 0.01
    #[arg(long, default_value_t = 0.5, value_parser = unit_interval)]
    last_evaluation: f64,

    /// Number of projects, 1 to 10
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=10))]
    number_project: i64,

    /// Average monthly hours, 100 to 400
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(i64).range(100..=400))]
    average_monthly_hours: i64,

    /// Years at the company, 1 to 10
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=10))]
    time_spend_company: i64,

    /// Had a work accident (0 or 1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    work_accident: u8,

    /// Promoted in the last 5 years (0 or 1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    promotion_last_5years: u8,

    /// Department
    #[arg(
        long,
        default_value_t = Department::Sales,
        value_parser = PossibleValuesParser::new(Department::ALL.map(|d| d.as_str()))
            .try_map(|s| s.parse::<Department>())
    )]
    department: Department,

    /// Salary level
    #[arg(
        long,
        default_value_t = SalaryLevel::Low,
        value_parser = PossibleValuesParser::new(SalaryLevel::ALL.map(|l| l.as_str()))
            .try_map(|s| s.parse::<SalaryLevel>())
    )]
    salary: SalaryLevel,
}

impl Cli {
    fn features(&self) -> EmployeeFeatures {
        EmployeeFeatures {
            satisfaction_level: self.satisfaction_level,
            last_evaluation: self.last_evaluation,
            number_project: self.number_project,
            average_monthly_hours: self.average_monthly_hours,
            time_spend_company: self.time_spend_company,
            work_accident: self.work_accident,
            promotion_last_5years: self.promotion_last_5years,
            department: self.department,
            salary: self.salary,
        }
    }
}

/// Parse a fraction in `[0, 1]`, snapped to the 0.01 grid.
fn unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is not in 0.0..=1.0"));
    }
    Ok((value * 100.0).round() / 100.0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let input = cli.features();
    info!("input features: {input:?}");

    println!("{TITLE}");
    println!("{DESCRIPTION}");
    println!();

    let outcome = shared_model(&cli.model)
        .and_then(|classifier| predict_employee(classifier.as_ref(), &input));

    match outcome {
        Ok(prediction) => {
            let verdict = Verdict::from(&prediction);
            match verdict.severity() {
                Severity::Alert => warn!("employee flagged as likely to leave"),
                Severity::Reassuring => info!("employee expected to stay"),
            }
            println!("{verdict}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{FAILURE_MESSAGE}");
            Err(err).with_context(|| format!("predicting with {}", cli.model.display()))
        }
    }
}
