//! Pure projection from client state to a `Screen`.
//!
//! Nothing here owns state or performs I/O; presenters in `crate::output`
//! decide how a screen reaches the terminal.

use serde::Serialize;

use crate::api::{DayMeal, FlyerItem, FlyerSummary};
use crate::catalog::CatalogState;
use crate::session::{App, SessionState};

pub mod text;

pub const LOADING_TEXT: &str = "Loading flyers...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlyerTile {
    pub id: i64,
    pub merchant: String,
    pub thumbnail_url: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Spinner { text: String },
    ErrorBanner { message: String },
    FlyerGrid { tiles: Vec<FlyerTile>, clickable: bool },
    Status { text: String },
    MealPlanPanel { merchant: String, days: Vec<DayMeal>, shopping_list: Vec<String> },
    ItemTable { store: String, rows: Vec<FlyerItem> },
    Notice { text: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Screen {
    pub blocks: Vec<Block>,
}

#[cfg(test)]
impl Screen {
    pub fn error_banners(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::ErrorBanner { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn grid(&self) -> Option<(&[FlyerTile], bool)> {
        self.blocks.iter().find_map(|b| match b {
            Block::FlyerGrid { tiles, clickable } => Some((tiles.as_slice(), *clickable)),
            _ => None,
        })
    }
}

pub fn render(app: &App) -> Screen {
    let mut blocks = catalog_blocks(app.catalog(), app.selected_id(), !app.in_flight());
    match app.session() {
        SessionState::Idle => {}
        SessionState::InFlight { flyer, stage, .. } => {
            blocks.push(Block::Status { text: stage.status(&flyer.merchant) });
        }
        SessionState::Failed { message } => {
            blocks.push(Block::ErrorBanner { message: message.clone() });
        }
        SessionState::Success { flyer, plan } => {
            blocks.push(Block::MealPlanPanel {
                merchant: flyer.merchant.clone(),
                days: plan.days.clone(),
                shopping_list: plan.shopping_list.clone(),
            });
        }
    }
    Screen { blocks }
}

pub fn render_catalog(catalog: &CatalogState) -> Screen {
    Screen { blocks: catalog_blocks(catalog, None, true) }
}

pub fn render_items(store: &str, items: &[FlyerItem]) -> Screen {
    let block = if items.is_empty() {
        Block::Notice { text: format!("No stored items for {store}. Run a plan for this store first.") }
    } else {
        Block::ItemTable { store: store.to_string(), rows: items.to_vec() }
    };
    Screen { blocks: vec![block] }
}

pub fn render_error(message: &str) -> Screen {
    Screen { blocks: vec![Block::ErrorBanner { message: message.to_string() }] }
}

fn catalog_blocks(catalog: &CatalogState, selected: Option<i64>, clickable: bool) -> Vec<Block> {
    match catalog {
        CatalogState::Loading => vec![Block::Spinner { text: LOADING_TEXT.to_string() }],
        CatalogState::Failed(message) => vec![Block::ErrorBanner { message: message.clone() }],
        CatalogState::Ready(flyers) => vec![Block::FlyerGrid {
            tiles: flyers.iter().map(|f| tile(f, selected)).collect(),
            clickable,
        }],
    }
}

fn tile(flyer: &FlyerSummary, selected: Option<i64>) -> FlyerTile {
    FlyerTile {
        id: flyer.id,
        merchant: flyer.merchant.clone(),
        thumbnail_url: flyer.thumbnail_url.clone(),
        selected: selected == Some(flyer.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{flyer, sample_meal_plan};
    use crate::session::{AppEvent, Command};

    fn app_with(flyers: Vec<FlyerSummary>) -> App {
        let mut app = App::new();
        app.handle(AppEvent::CatalogLoaded(CatalogState::Ready(flyers)));
        app
    }

    #[test]
    fn loading_catalog_shows_spinner_only() {
        let screen = render(&App::new());
        assert_eq!(screen.blocks, vec![Block::Spinner { text: LOADING_TEXT.into() }]);
    }

    #[test]
    fn failed_catalog_has_banner_and_no_grid() {
        let screen = render_catalog(&CatalogState::Failed("No grocery flyers found for postal code M5V2T6.".into()));
        assert_eq!(screen.error_banners().count(), 1);
        assert!(screen.grid().is_none());
    }

    #[test]
    fn grid_is_disabled_while_in_flight() {
        let mut app = app_with(vec![flyer(1, "FreshCo", &["Groceries"]), flyer(2, "Metro", &["Groceries"])]);
        let Some(Command::RunPipeline { token, .. }) = app.select(Some(2)) else { panic!("not started") };

        let screen = render(&app);
        let (tiles, clickable) = screen.grid().unwrap();
        assert!(!clickable);
        assert!(tiles[1].selected && !tiles[0].selected);
        assert!(matches!(screen.blocks.last(), Some(Block::Status { text }) if text.starts_with("Fetching and storing")));

        app.finish(token, Ok(sample_meal_plan()));
        assert!(render(&app).grid().unwrap().1);
    }

    #[test]
    fn meal_plan_panel_has_five_days_and_two_items() {
        let mut app = app_with(vec![flyer(1, "FreshCo", &["Groceries"])]);
        let Some(Command::RunPipeline { token, .. }) = app.select(Some(1)) else { panic!("not started") };
        app.finish(token, Ok(sample_meal_plan()));

        let screen = render(&app);
        match screen.blocks.last() {
            Some(Block::MealPlanPanel { merchant, days, shopping_list }) => {
                assert_eq!(merchant, "FreshCo");
                assert_eq!(days.len(), 5);
                assert_eq!(days[0], DayMeal { day: "Monday".into(), meal: "Pasta".into() });
                assert_eq!(shopping_list.len(), 2);
            }
            other => panic!("expected meal plan panel, got {other:?}"),
        }
        assert_eq!(screen.error_banners().count(), 0);
    }

    #[test]
    fn session_failure_shows_exactly_one_banner() {
        let mut app = app_with(vec![flyer(1, "FreshCo", &["Groceries"])]);
        let Some(Command::RunPipeline { token, .. }) = app.select(Some(1)) else { panic!("not started") };
        app.finish(token, Err("Request failed with status 500.".into()));

        let screen = render(&app);
        assert_eq!(screen.error_banners().collect::<Vec<_>>(), ["Request failed with status 500."]);
        assert!(!screen.blocks.iter().any(|b| matches!(b, Block::MealPlanPanel { .. })));
    }

    #[test]
    fn screen_serializes_with_kind_tags() {
        let screen = render_items("Walmart", &[]);
        let value = serde_json::to_value(&screen).unwrap();
        assert_eq!(value["blocks"][0]["kind"], "notice");
    }
}
