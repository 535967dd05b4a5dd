use apify::SpecSummary;
use serde::Serialize;

pub mod content;
pub mod list;
pub mod serve;
pub mod show;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResult {
    SpecList {
        specs: Vec<SpecSummary>,
    },
    SpecDetail {
        summary: SpecSummary,
        source: String,
    },
    SpecContent {
        id: String,
        media_type: &'static str,
        content: String,
        #[serde(skip)]
        raw: Vec<u8>,
    },
    ServerStopped {
        address: String,
    },
}
