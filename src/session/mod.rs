use serde::Serialize;

use crate::api::{FlyerSummary, MealPlan};
use crate::catalog::CatalogState;

pub mod pipeline;

pub const INVALID_SELECTION: &str = "Please select a valid flyer.";

/// Generation number of an accepted selection. Completions carrying an older
/// token are dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionToken(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Storing,
    Extracting,
    Generating,
}

impl Stage {
    #[cfg(test)]
    pub const ALL: [Stage; 3] = [Stage::Storing, Stage::Extracting, Stage::Generating];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Storing => "store",
            Stage::Extracting => "extract",
            Stage::Generating => "generate",
        }
    }

    pub fn status(&self, merchant: &str) -> String {
        match self {
            Stage::Storing => format!("Fetching and storing flyer image for {merchant}..."),
            Stage::Extracting => format!("Extracting items from {merchant} flyer..."),
            Stage::Generating => format!("Generating meal plan from {merchant} deals..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    InFlight { token: SessionToken, flyer: FlyerSummary, stage: Stage },
    Success { flyer: FlyerSummary, plan: MealPlan },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    CatalogLoaded(CatalogState),
    /// `None` when the user submitted nothing usable as a flyer id.
    Select(Option<i64>),
    StageStarted { token: SessionToken, stage: Stage },
    Finished { token: SessionToken, outcome: Result<MealPlan, String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RunPipeline { token: SessionToken, flyer: FlyerSummary },
}

/// All client state. Owned by exactly one event loop.
#[derive(Debug)]
pub struct App {
    catalog: CatalogState,
    session: SessionState,
    next_token: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App { catalog: CatalogState::Loading, session: SessionState::Idle, next_token: 0 }
    }

    pub fn catalog(&self) -> &CatalogState { &self.catalog }

    pub fn session(&self) -> &SessionState { &self.session }

    pub fn in_flight(&self) -> bool {
        matches!(self.session, SessionState::InFlight { .. })
    }

    #[cfg(test)]
    pub fn meal_plan(&self) -> Option<&MealPlan> {
        match &self.session {
            SessionState::Success { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::CatalogLoaded(state) => {
                self.catalog = state;
                None
            }
            AppEvent::Select(id) => self.select(id),
            AppEvent::StageStarted { token, stage } => {
                self.stage(token, stage);
                None
            }
            AppEvent::Finished { token, outcome } => {
                self.finish(token, outcome);
                None
            }
        }
    }

    /// Start a session for `id`. Ignored while another session is in flight
    /// and while there is no catalog to pick from.
    pub fn select(&mut self, id: Option<i64>) -> Option<Command> {
        if self.in_flight() || !matches!(self.catalog, CatalogState::Ready(_)) {
            return None;
        }
        let flyer = id.and_then(|id| self.catalog.find(id)).cloned();
        let Some(flyer) = flyer else {
            self.session = SessionState::Failed { message: INVALID_SELECTION.to_string() };
            return None;
        };
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        self.session = SessionState::InFlight { token, flyer: flyer.clone(), stage: Stage::Storing };
        Some(Command::RunPipeline { token, flyer })
    }

    /// Returns false when `token` is not the in-flight session.
    pub fn stage(&mut self, token: SessionToken, stage: Stage) -> bool {
        match &mut self.session {
            SessionState::InFlight { token: current, stage: s, .. } if *current == token => {
                *s = stage;
                true
            }
            _ => false,
        }
    }

    /// Returns false when `token` is stale and the outcome was dropped.
    pub fn finish(&mut self, token: SessionToken, outcome: Result<MealPlan, String>) -> bool {
        let flyer = match &self.session {
            SessionState::InFlight { token: current, flyer, .. } if *current == token => flyer.clone(),
            _ => return false,
        };
        self.session = match outcome {
            Ok(plan) => SessionState::Success { flyer, plan },
            Err(message) => SessionState::Failed { message },
        };
        true
    }

    pub fn selected_id(&self) -> Option<i64> {
        match &self.session {
            SessionState::InFlight { flyer, .. } | SessionState::Success { flyer, .. } => Some(flyer.id),
            _ => None,
        }
    }
}
