//! Drop → list → extract sequencing.
//!
//! All state is owned by [`Session`] and mutated only on the UI thread. Each
//! tool invocation runs on its own thread and reports back through a channel;
//! [`Session::poll`] drains it once per frame. A completion is applied only
//! when it carries the current token and the current archive path.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::error::{Result, ShellError};
use crate::listing::parse_listing;
use crate::models::{ArchiveEntry, OperationToken, Password};
use crate::tool::{classify, extract_args, list_args, ArchiveTool, Outcome};
use crate::utils::default_output_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordOperation {
    List,
    Extract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Listing,
    AwaitingPassword(PasswordOperation),
    Listed,
    Extracting,
}

/// Message for the user, shown one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
    Extracted(PathBuf),
}

#[derive(Debug, Clone)]
enum TaskKind {
    List,
    Extract { output_dir: PathBuf },
}

#[derive(Debug)]
struct Completion {
    token: OperationToken,
    archive: PathBuf,
    kind: TaskKind,
    outcome: Outcome,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct Session {
    tool: Arc<dyn ArchiveTool>,
    token: OperationToken,
    current_archive: Option<PathBuf>,
    password: Password,
    entries: Vec<ArchiveEntry>,
    phase: Phase,
    notices: VecDeque<Notice>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    waker: Waker,
}

impl Session {
    pub fn new(tool: Arc<dyn ArchiveTool>) -> Self {
        let (completion_tx, completion_rx) = unbounded();
        Self {
            tool,
            token: OperationToken::default(),
            current_archive: None,
            password: Password::default(),
            entries: Vec::new(),
            phase: Phase::Idle,
            notices: VecDeque::new(),
            completion_tx,
            completion_rx,
            waker: Arc::new(|| {}),
        }
    }

    /// Called from worker threads after they post a completion.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Arc::new(waker);
        self
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn current_archive(&self) -> Option<&Path> {
        self.current_archive.as_deref()
    }

    pub fn token(&self) -> OperationToken {
        self.token
    }

    pub fn tool_location(&self) -> &Path {
        self.tool.location()
    }

    /// File name shown in the password prompt.
    pub fn archive_display_name(&self) -> String {
        self.current_archive
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extract_enabled(&self) -> bool {
        self.phase == Phase::Listed
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Listing | Phase::Extracting)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Starts over with a new archive. Directories and unreadable paths are
    /// rejected without touching the current session.
    pub fn drop_archive(&mut self, path: &Path) {
        info!("Archive dropped: {:?}", path);
        match fs::metadata(path) {
            Err(e) => {
                warn!("Cannot stat {:?}: {}", path, e);
                self.notices
                    .push_back(Notice::Error(format!("Cannot read file: {e}")));
                return;
            }
            Ok(meta) if meta.is_dir() => {
                self.notices.push_back(Notice::Info(
                    "Please drop a single archive file, not a folder.".to_string(),
                ));
                return;
            }
            Ok(_) => {}
        }

        self.token = self.token.next();
        self.current_archive = Some(path.to_path_buf());
        self.password.clear();
        self.start_listing();
    }

    pub fn submit_password(&mut self, password: String) {
        let Phase::AwaitingPassword(operation) = self.phase else {
            warn!("Password submitted while not awaiting one");
            return;
        };
        self.password.set(password);
        self.token = self.token.next();
        info!("Retrying {:?} with a password", operation);
        match operation {
            PasswordOperation::List => self.start_listing(),
            PasswordOperation::Extract => self.start_extract(),
        }
    }

    pub fn cancel_password(&mut self) {
        match self.phase {
            Phase::AwaitingPassword(PasswordOperation::List) => {
                info!("Password prompt cancelled, archive not listed");
                self.phase = Phase::Idle;
            }
            Phase::AwaitingPassword(PasswordOperation::Extract) => {
                info!("Password prompt cancelled, extraction skipped");
                self.phase = Phase::Listed;
            }
            _ => {}
        }
    }

    pub fn request_extract(&mut self) {
        if self.phase != Phase::Listed {
            warn!("Extract requested in phase {:?}", self.phase);
            return;
        }
        self.start_extract();
    }

    /// Applies every completion that has arrived so far.
    pub fn poll(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
        }
    }

    fn start_listing(&mut self) {
        let Some(archive) = self.current_archive.clone() else {
            return;
        };
        self.entries.clear();
        self.phase = Phase::Listing;
        let args = list_args(&archive, self.password.as_str());
        self.spawn(TaskKind::List, archive, args);
    }

    fn start_extract(&mut self) {
        let Some(archive) = self.current_archive.clone() else {
            return;
        };
        let output_dir = match create_output_dir(&archive) {
            Ok(dir) => dir,
            Err(e) => {
                error!("{}", e);
                self.notices.push_back(Notice::Error(e.to_string()));
                self.phase = Phase::Listed;
                return;
            }
        };
        self.phase = Phase::Extracting;
        let args = extract_args(&archive, &output_dir, self.password.as_str());
        self.spawn(TaskKind::Extract { output_dir }, archive, args);
    }

    fn spawn(&mut self, kind: TaskKind, archive: PathBuf, args: Vec<String>) {
        let token = self.token;
        let tool = Arc::clone(&self.tool);
        let tx = self.completion_tx.clone();
        let waker = Arc::clone(&self.waker);
        let fallback_phase = match kind {
            TaskKind::List => Phase::Idle,
            TaskKind::Extract { .. } => Phase::Listed,
        };

        debug!("Spawning {:?} for token {:?}", kind, token);
        let spawned = thread::Builder::new()
            .name("7zz-task".to_string())
            .spawn(move || {
                let outcome = classify(tool.run(&args));
                let completion = Completion {
                    token,
                    archive,
                    kind,
                    outcome,
                };
                if tx.send(completion).is_err() {
                    debug!("Session gone, dropping completion");
                }
                waker();
            });

        if let Err(e) = spawned {
            let e = ShellError::Thread(e);
            error!("{}", e);
            self.notices.push_back(Notice::Error(e.to_string()));
            self.phase = fallback_phase;
        }
    }

    fn apply(&mut self, completion: Completion) {
        let current = self.current_archive.as_deref() == Some(completion.archive.as_path());
        if completion.token != self.token || !current {
            debug!(
                "Discarding stale result for {:?} (token {:?}, current {:?})",
                completion.archive, completion.token, self.token
            );
            return;
        }

        match completion.kind {
            TaskKind::List => self.finish_listing(completion.outcome),
            TaskKind::Extract { output_dir } => self.finish_extract(output_dir, completion.outcome),
        }
    }

    fn finish_listing(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded(output) => {
                self.entries = parse_listing(&output);
                info!("Listed {} entries", self.entries.len());
                self.phase = Phase::Listed;
            }
            Outcome::PasswordRequired => {
                info!("Archive needs a password to list");
                self.phase = Phase::AwaitingPassword(PasswordOperation::List);
            }
            Outcome::ToolNotFound(path) => {
                error!("Archive tool not found at {:?}", path);
                self.notices
                    .push_back(Notice::Error(ShellError::ToolNotFound { path }.to_string()));
                self.phase = Phase::Idle;
            }
            Outcome::Failed(output) => {
                error!("Listing failed: {}", output);
                self.notices.push_back(Notice::Error(output));
                self.phase = Phase::Idle;
            }
        }
    }

    fn finish_extract(&mut self, output_dir: PathBuf, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded(_) => {
                info!("Extracted into {:?}", output_dir);
                self.notices.push_back(Notice::Extracted(output_dir));
                self.phase = Phase::Listed;
            }
            Outcome::PasswordRequired => {
                info!("Archive needs a password to extract");
                self.phase = Phase::AwaitingPassword(PasswordOperation::Extract);
            }
            Outcome::ToolNotFound(path) => {
                error!("Archive tool not found at {:?}", path);
                self.notices
                    .push_back(Notice::Error(ShellError::ToolNotFound { path }.to_string()));
                self.phase = Phase::Listed;
            }
            Outcome::Failed(output) => {
                error!("Extraction failed: {}", output);
                self.notices
                    .push_back(Notice::Error(format!("Extraction failed: {output}")));
                self.phase = Phase::Listed;
            }
        }
    }
}

fn create_output_dir(archive: &Path) -> Result<PathBuf> {
    let output_dir = default_output_dir(archive);
    fs::create_dir_all(&output_dir).map_err(|source| ShellError::CreateOutputDir {
        path: output_dir.clone(),
        source,
    })?;
    Ok(output_dir)
}
