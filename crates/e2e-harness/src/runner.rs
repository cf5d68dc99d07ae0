//! Spec Runner
//!
//! Mounts a fresh board per test, executes its steps in order and stops at
//! the first failing step.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use item_board_core::{
    placeholder_image_url, Board, FormField, ItemApi, ItemId, PLACEHOLDER_IMAGE_BASE,
};
use tracing::{debug, error, info, warn};

use crate::config::{HarnessConfig, Reporter};
use crate::discover::discover_specs;
use crate::error::{HarnessError, Result};
use crate::report::{write_junit, SpecOutcome, TestOutcome};
use crate::snapshot;
use crate::spec::{ItemRef, SpecFile, Step, TestCase};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub specs: usize,
    pub tests: usize,
    pub failures: usize,
    pub reports: Vec<PathBuf>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failures == 0
    }
}

/// Per-test bookkeeping the steps refer to
#[derive(Default)]
struct TestContext {
    last_created: Option<ItemId>,
    image_before_submit: Option<String>,
}

pub struct Runner<F> {
    config: HarnessConfig,
    root: PathBuf,
    api_factory: F,
}

impl<F, A> Runner<F>
where
    F: Fn() -> A,
    A: ItemApi,
{
    /// `root` anchors the spec pattern and every output folder;
    /// `api_factory` yields the client for each freshly mounted board
    pub fn new(config: HarnessConfig, root: impl Into<PathBuf>, api_factory: F) -> Self {
        Self {
            config,
            root: root.into(),
            api_factory,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let specs = discover_specs(&self.root, &self.config.spec_pattern)?;
        if specs.is_empty() {
            warn!("No specs match '{}' under {}", self.config.spec_pattern, self.root.display());
        }

        let mut summary = RunSummary::default();
        for spec in specs {
            let outcome = self.run_spec(&spec).await?;
            summary.specs += 1;
            summary.tests += outcome.tests.len();
            summary.failures += outcome.failures();

            if self.config.reporter == Reporter::Junit {
                let path = write_junit(
                    &self.root,
                    &self.config.reporter_options.mocha_file,
                    &outcome,
                    &self.config.default_browser,
                )?;
                info!("Report written to {}", path.display());
                summary.reports.push(path);
            }
            if self.config.video {
                self.save_transcript(&outcome)?;
            }
        }

        info!(
            "{} specs, {} tests, {} failed",
            summary.specs, summary.tests, summary.failures
        );
        Ok(summary)
    }

    /// Run every test of one spec file (path relative to the root)
    pub async fn run_spec(&self, relative: &Path) -> Result<SpecOutcome> {
        let spec_name = relative.to_string_lossy().replace('\\', "/");
        let file = SpecFile::load(&self.root.join(relative))?;
        info!("Running {} ({} tests)", spec_name, file.tests.len());

        let mut outcome = SpecOutcome {
            spec: spec_name,
            started: Utc::now(),
            tests: Vec::with_capacity(file.tests.len()),
            transcript: Vec::new(),
        };
        for test in &file.tests {
            let result = self.run_test(&outcome.spec, test, &mut outcome.transcript).await?;
            outcome.tests.push(result);
        }
        Ok(outcome)
    }

    async fn run_test(
        &self,
        spec: &str,
        test: &TestCase,
        transcript: &mut Vec<String>,
    ) -> Result<TestOutcome> {
        let started = Instant::now();
        let mut seq = 0u64;
        let mut board = Board::new((self.api_factory)(), move || {
            seq += 1;
            placeholder_image_url(seq as f64)
        });
        let mut ctx = TestContext::default();

        transcript.push(format!("# {}", test.name));
        board.mount().await;

        let mut failure = None;
        for (index, step) in test.steps.iter().enumerate() {
            transcript.push(format!("  {:>2}. {:?}", index + 1, step));
            debug!("{} :: {} :: {:?}", spec, test.name, step);
            if let Err(reason) = execute(&mut board, step, &mut ctx).await {
                let reason = format!("step {} ({:?}): {}", index + 1, step, reason);
                transcript.push(format!("      FAILED {}", reason));
                failure = Some(reason);
                break;
            }
        }

        let mut snapshot = None;
        match &failure {
            None => info!("  ✓ {}", test.name),
            Some(reason) => {
                error!("  ✗ {}: {}", test.name, reason);
                if self.config.screenshot_on_run_failure {
                    let folder = self.root.join(&self.config.screenshots_folder);
                    snapshot = Some(snapshot::save_failure(&folder, spec, &test.name, board.state())?);
                }
            }
        }

        Ok(TestOutcome {
            name: test.name.clone(),
            duration: started.elapsed(),
            failure,
            snapshot,
        })
    }

    fn save_transcript(&self, outcome: &SpecOutcome) -> Result<PathBuf> {
        let folder = self.root.join(&self.config.videos_folder);
        std::fs::create_dir_all(&folder).map_err(|e| HarnessError::io(&folder, e))?;
        let path = folder.join(format!("{}.log", snapshot::sanitize(&outcome.spec)));
        std::fs::write(&path, outcome.transcript.join("\n")).map_err(|e| HarnessError::io(&path, e))?;
        Ok(path)
    }
}

fn parse_field(name: &str) -> std::result::Result<FormField, String> {
    name.parse::<FormField>().map_err(|e| e.to_string())
}

fn resolve(item: &ItemRef, ctx: &TestContext) -> std::result::Result<ItemId, String> {
    match item {
        ItemRef::Id(id) => Ok(id.clone()),
        ItemRef::Last => ctx
            .last_created
            .clone()
            .ok_or_else(|| "no item has been created yet".to_string()),
    }
}

fn expect_eq(what: &str, expected: &str, actual: &str) -> std::result::Result<(), String> {
    if expected == actual {
        Ok(())
    } else {
        Err(format!("expected {} {:?}, got {:?}", what, expected, actual))
    }
}

async fn execute<A: ItemApi>(
    board: &mut Board<A>,
    step: &Step,
    ctx: &mut TestContext,
) -> std::result::Result<(), String> {
    match step {
        Step::Fill { field, value } => {
            let field = parse_field(field)?;
            board.handle_change(field.name(), value.as_str());
        }
        Step::Submit => {
            let before: HashSet<ItemId> = board.state().items.iter().map(|i| i.id.clone()).collect();
            ctx.image_before_submit = Some(board.state().draft.image.clone());
            // `last` only ever names an item this submit produced
            ctx.last_created = None;
            board.submit().await;
            if let Some(new_item) = board.state().items.iter().rev().find(|i| !before.contains(&i.id)) {
                ctx.last_created = Some(new_item.id.clone());
            }
        }
        Step::Reload => board.load().await,
        Step::Delete { item } => {
            let id = resolve(item, ctx)?;
            board.delete(&id).await;
        }
        Step::ExpectMessage { text } => expect_eq("message", text, &board.state().message)?,
        Step::ExpectItem { item, user_id, keywords, description } => {
            let id = resolve(item, ctx)?;
            let found = board
                .state()
                .find(&id)
                .ok_or_else(|| format!("item {} is not listed", id))?;
            if let Some(v) = user_id {
                expect_eq("user_id", v, &found.user_id)?;
            }
            if let Some(v) = keywords {
                expect_eq("keywords", v, &found.keywords)?;
            }
            if let Some(v) = description {
                expect_eq("description", v, &found.description)?;
            }
        }
        Step::ExpectNoItem { item } => {
            let id = resolve(item, ctx)?;
            if board.state().contains(&id) {
                return Err(format!("item {} is still listed", id));
            }
        }
        Step::ExpectCount { count } => {
            let actual = board.state().items.len();
            if actual != *count {
                return Err(format!("expected {} items, got {}", count, actual));
            }
        }
        Step::ExpectDraft { field, value } => {
            let field = parse_field(field)?;
            expect_eq(field.name(), value, board.state().draft.get(field))?;
        }
        Step::ExpectDraftReset => {
            let draft = &board.state().draft;
            for field in FormField::ALL {
                if field != FormField::Image && !draft.get(field).is_empty() {
                    return Err(format!("field {} not reset: {:?}", field.name(), draft.get(field)));
                }
            }
            if !draft.image.starts_with(PLACEHOLDER_IMAGE_BASE) {
                return Err(format!("image is not a placeholder: {:?}", draft.image));
            }
            if ctx.image_before_submit.as_deref() == Some(draft.image.as_str()) {
                return Err("placeholder image was not regenerated".to_string());
            }
        }
    }
    Ok(())
}
