pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn catalog() -> LogCtx<ops::catalog::Catalog> { LogCtx::new(config::logs_are_json()) }
pub fn plan() -> LogCtx<ops::plan::Plan> { LogCtx::new(config::logs_are_json()) }
pub fn browse() -> LogCtx<ops::browse::Browse> { LogCtx::new(config::logs_are_json()) }
pub fn items() -> LogCtx<ops::items::Items> { LogCtx::new(config::logs_are_json()) }
