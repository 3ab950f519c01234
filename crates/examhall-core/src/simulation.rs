//! Concurrent exam simulation.
//!
//! Drives many simulated students through start → answer → complete against
//! one shared registry, with bounded parallelism, and reports the outcome.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::model::{QuestionnaireId, SessionId, StudentId};
use crate::questionnaire::Questionnaire;
use crate::registry::SessionRegistry;

/// Answer submitted by students that are meant to get a question wrong.
pub const WRONG_ANSWER: &str = "Wrong Answer";

/// How simulated students answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStrategy {
    /// Students with an even id answer everything correctly, the rest answer
    /// everything wrong.
    Alternating,
    AllCorrect,
    AllWrong,
}

impl AnswerStrategy {
    pub fn answers_correctly(self, student: StudentId) -> bool {
        match self {
            AnswerStrategy::Alternating => student.get() % 2 == 0,
            AnswerStrategy::AllCorrect => true,
            AnswerStrategy::AllWrong => false,
        }
    }
}

impl fmt::Display for AnswerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerStrategy::Alternating => write!(f, "alternating"),
            AnswerStrategy::AllCorrect => write!(f, "all_correct"),
            AnswerStrategy::AllWrong => write!(f, "all_wrong"),
        }
    }
}

impl FromStr for AnswerStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "alternating" => Ok(AnswerStrategy::Alternating),
            "all_correct" | "correct" => Ok(AnswerStrategy::AllCorrect),
            "all_wrong" | "wrong" => Ok(AnswerStrategy::AllWrong),
            other => Err(format!("unknown answer strategy: {other}")),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of students; ids run from 1 to `students`.
    pub students: usize,
    /// Maximum students working at the same time.
    pub parallelism: usize,
    /// Pause before each submitted answer.
    pub think_time: Duration,
    pub strategy: AnswerStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            students: 100,
            parallelism: 16,
            think_time: Duration::from_millis(100),
            strategy: AnswerStrategy::Alternating,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_student_start(&self, student: StudentId, session: SessionId);
    fn on_student_complete(&self, outcome: &StudentOutcome);
    fn on_student_error(&self, student: StudentId, error: &str);
    fn on_simulation_complete(
        &self,
        total: usize,
        completed: usize,
        failed: usize,
        elapsed: Duration,
    );
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_student_start(&self, _: StudentId, _: SessionId) {}
    fn on_student_complete(&self, _: &StudentOutcome) {}
    fn on_student_error(&self, _: StudentId, _: &str) {}
    fn on_simulation_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Result of one simulated student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentOutcome {
    pub student_id: StudentId,
    pub student_name: String,
    pub session_id: SessionId,
    /// Answers the registry accepted.
    pub answered: usize,
    pub score: u32,
    pub elapsed_ms: i64,
}

/// Questionnaire metadata without the questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    pub id: QuestionnaireId,
    pub title: String,
    pub question_count: usize,
    pub total_points: u32,
    pub time_limit_minutes: u32,
}

impl From<&Questionnaire> for QuestionnaireSummary {
    fn from(q: &Questionnaire) -> Self {
        Self {
            id: q.id(),
            title: q.title().to_string(),
            question_count: q.question_count(),
            total_points: q.total_points(),
            time_limit_minutes: q.time_limit_minutes(),
        }
    }
}

/// A complete simulation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Unique run identifier.
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub questionnaire: QuestionnaireSummary,
    pub strategy: AnswerStrategy,
    pub students: usize,
    pub parallelism: usize,
    /// Per-student outcomes, in completion order.
    pub outcomes: Vec<StudentOutcome>,
    pub failed: usize,
    /// Registry-wide active sessions once the run finished.
    pub active_sessions: usize,
    /// Registry-wide completed sessions once the run finished.
    pub completed_sessions: usize,
    /// Average over every completed session of the questionnaire.
    pub average_score: f64,
    pub duration_ms: u64,
}

impl SimulationReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }
}

/// Runs simulated students against a shared registry.
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every student to completion and collect the results.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run(
        &self,
        registry: Arc<SessionRegistry>,
        questionnaire_id: QuestionnaireId,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<SimulationReport> {
        anyhow::ensure!(self.config.parallelism >= 1, "parallelism must be at least 1");
        anyhow::ensure!(
            self.config.parallelism <= Semaphore::MAX_PERMITS,
            "parallelism must be at most {}",
            Semaphore::MAX_PERMITS
        );

        let questionnaire = Arc::new(
            registry
                .questionnaire(questionnaire_id)
                .ok_or(RegistryError::QuestionnaireNotFound(questionnaire_id))?,
        );

        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));
        tracing::info!(
            run = %run_id,
            questionnaire = %questionnaire_id,
            students = self.config.students,
            parallelism = self.config.parallelism,
            "starting simulation"
        );

        let mut tasks = FuturesUnordered::new();
        for n in 1..=self.config.students as u64 {
            let student = StudentId(n);
            let registry = Arc::clone(&registry);
            let questionnaire = Arc::clone(&questionnaire);
            let semaphore = Arc::clone(&semaphore);
            let progress = Arc::clone(&progress);
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let result = run_student(
                    &registry,
                    &questionnaire,
                    student,
                    &config,
                    &semaphore,
                    progress.as_ref(),
                )
                .await;
                (student, result)
            });
            tasks.push(handle);
        }

        let total = tasks.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut failed = 0usize;

        while let Some(joined) = tasks.next().await {
            match joined {
                Ok((_, Ok(outcome))) => {
                    progress.on_student_complete(&outcome);
                    outcomes.push(outcome);
                }
                Ok((student, Err(e))) => {
                    tracing::error!("student {student} failed: {e:#}");
                    progress.on_student_error(student, &e.to_string());
                    failed += 1;
                }
                Err(e) => {
                    tracing::error!("student task aborted: {e}");
                    failed += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        progress.on_simulation_complete(total, outcomes.len(), failed, elapsed);
        tracing::info!(
            run = %run_id,
            completed = outcomes.len(),
            failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulation finished"
        );

        let summary = registry
            .questionnaire(questionnaire_id)
            .map(|q| QuestionnaireSummary::from(&q))
            .unwrap_or_else(|| QuestionnaireSummary::from(questionnaire.as_ref()));

        Ok(SimulationReport {
            id: run_id,
            created_at: Utc::now(),
            questionnaire: summary,
            strategy: self.config.strategy,
            students: self.config.students,
            parallelism: self.config.parallelism,
            outcomes,
            failed,
            active_sessions: registry.active_session_count(),
            completed_sessions: registry.completed_session_count(),
            average_score: registry.average_score(questionnaire_id),
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}

async fn run_student(
    registry: &SessionRegistry,
    questionnaire: &Questionnaire,
    student: StudentId,
    config: &SimulationConfig,
    semaphore: &Arc<Semaphore>,
    progress: &dyn ProgressReporter,
) -> Result<StudentOutcome> {
    let _permit = semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

    let name = format!("Student_{student}");
    let session_id = registry
        .start_session(student, name.clone(), questionnaire.id())
        .with_context(|| format!("failed to start session for {name}"))?;
    progress.on_student_start(student, session_id);

    let correct = config.strategy.answers_correctly(student);
    let mut answered = 0usize;
    for question in questionnaire.questions() {
        if !config.think_time.is_zero() {
            tokio::time::sleep(config.think_time).await;
        }
        let answer = if correct {
            question.correct_answer()
        } else {
            WRONG_ANSWER
        };
        if registry.submit_answer(session_id, question.id(), answer) {
            answered += 1;
        }
    }

    anyhow::ensure!(
        registry.complete_session(session_id),
        "session {session_id} was no longer active"
    );
    let session = registry
        .session(session_id)
        .with_context(|| format!("session {session_id} vanished after completion"))?;

    Ok(StudentOutcome {
        student_id: student,
        student_name: name,
        session_id,
        answered,
        score: session.score(),
        elapsed_ms: session.elapsed().num_milliseconds(),
    })
}
