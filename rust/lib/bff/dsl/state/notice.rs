//! Transient notifications — stored at `notice/state`.

use flux_derive::state;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of notices, oldest first. The shell shows and dismisses them.
#[state("notice/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notices {
    pub items: Vec<Notice>,
    #[serde(skip)]
    pub next_id: u64,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|n| n.message.as_str()).collect()
    }
}
