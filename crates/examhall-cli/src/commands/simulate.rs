//! The `examhall simulate` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use examhall_core::simulation::{
    AnswerStrategy, ProgressReporter, Simulation, SimulationReport, StudentOutcome,
};
use examhall_core::{SessionId, SessionRegistry, StudentId};

use crate::config::load_config_from;
use crate::sample::load_sample_questionnaire;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_student_start(&self, student: StudentId, session: SessionId) {
        eprintln!("  Student_{student} started session {session}");
    }

    fn on_student_complete(&self, outcome: &StudentOutcome) {
        eprintln!(
            "  {} completed session {} (score {}, {}ms)",
            outcome.student_name, outcome.session_id, outcome.score, outcome.elapsed_ms
        );
    }

    fn on_student_error(&self, student: StudentId, error: &str) {
        eprintln!("  ERROR: Student_{student}: {error}");
    }

    fn on_simulation_complete(
        &self,
        total: usize,
        completed: usize,
        failed: usize,
        elapsed: Duration,
    ) {
        eprintln!(
            "\nComplete: {completed}/{total} students finished, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

/// Flag values; anything unset falls back to the config file.
pub struct SimulateArgs {
    pub students: Option<usize>,
    pub parallelism: Option<usize>,
    pub think_time_ms: Option<u64>,
    pub strategy: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: SimulateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let mut section = config.simulation;
    if let Some(students) = args.students {
        section.students = students;
    }
    if let Some(parallelism) = args.parallelism {
        section.parallelism = parallelism;
    }
    if let Some(think_time_ms) = args.think_time_ms {
        section.think_time_ms = think_time_ms;
    }
    if let Some(strategy) = &args.strategy {
        section.strategy = strategy
            .parse::<AnswerStrategy>()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    anyhow::ensure!(section.parallelism >= 1, "parallelism must be at least 1");

    let registry = Arc::new(SessionRegistry::new());
    let questionnaire_id = load_sample_questionnaire(&registry);

    eprintln!(
        "examhall v{} — Simulating {} students (parallelism {}, strategy {})",
        env!("CARGO_PKG_VERSION"),
        section.students,
        section.parallelism,
        section.strategy
    );
    eprintln!();

    let simulation = Simulation::new(section.to_simulation_config());
    let report = simulation
        .run(Arc::clone(&registry), questionnaire_id, Arc::new(ConsoleReporter))
        .await?;

    print_summary(&report);

    if let Some(path) = &args.output {
        report.save_json(path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &SimulationReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec![
        Cell::new("Questionnaire"),
        Cell::new(&report.questionnaire.title),
    ]);
    table.add_row(vec![
        Cell::new("Total students"),
        Cell::new(report.students),
    ]);
    table.add_row(vec![
        Cell::new("Active sessions"),
        Cell::new(report.active_sessions),
    ]);
    table.add_row(vec![
        Cell::new("Completed sessions"),
        Cell::new(report.completed_sessions),
    ]);
    table.add_row(vec![
        Cell::new("Failed students"),
        Cell::new(report.failed),
    ]);
    table.add_row(vec![
        Cell::new("Average score"),
        Cell::new(format!(
            "{:.2} / {}",
            report.average_score, report.questionnaire.total_points
        )),
    ]);
    table.add_row(vec![
        Cell::new("Time taken"),
        Cell::new(format!("{}ms", report.duration_ms)),
    ]);

    println!("{table}");
}
