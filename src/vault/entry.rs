//! Entry Record
//!
//! One credential: title, url, user, password and its timestamps.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

/// A credential record.
///
/// `id` is stable for the lifetime of the entry and is never shown. The table
/// keys masking and selection on `title`; `id` lets callers address one
/// specific entry when several share a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub creation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modification: Option<NaiveDateTime>,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url: url.into(),
            user: user.into(),
            password: password.into(),
            creation_date: Some(now),
            last_modification: Some(now),
        }
    }

    /// Copy of this entry under a fresh id and fresh timestamps.
    pub fn duplicate(&self) -> Self {
        let now = now();
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.creation_date = Some(now);
        copy.last_modification = Some(now);
        copy
    }

    pub fn touch(&mut self) {
        self.last_modification = Some(now());
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
