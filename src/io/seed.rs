//! Initial roster. Profiles come from a JSON file or a built-in list; the
//! state layer only ever sees `{id, name, avatar}` tuples.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::model::member::{Member, Status, Task};

/// Avatar used when a profile has none
pub const DEFAULT_AVATAR: &str = "/member-avatar.jpg";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read seed file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse seed file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("seed file {0} contains no profiles")]
    Empty(PathBuf),
}

/// One person as delivered by a profile source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// Anything that can hand over the initial profiles
pub trait SeedSource {
    fn fetch(&self) -> Result<Vec<SeedProfile>, SeedError>;
}

/// Fixed six-person roster used when no seed file is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSeed;

const BUILTIN_NAMES: [&str; 6] = [
    "Ava Thompson",
    "Liam Carter",
    "Mia Patel",
    "Noah Williams",
    "Zoe Martin",
    "Ethan Brooks",
];

impl SeedSource for BuiltinSeed {
    fn fetch(&self) -> Result<Vec<SeedProfile>, SeedError> {
        Ok(BUILTIN_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| SeedProfile {
                id: format!("member-{}", i + 1),
                name: name.to_string(),
                avatar: String::new(),
            })
            .collect())
    }
}

/// JSON file: either an array of profiles or a randomuser.me response body
#[derive(Debug, Clone)]
pub struct FileSeed {
    pub path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSeed { path: path.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Profiles(Vec<SeedProfile>),
    RandomUser { results: Vec<RandomUser> },
}

#[derive(Deserialize)]
struct RandomUser {
    name: RandomUserName,
    login: RandomUserLogin,
    #[serde(default)]
    picture: Option<RandomUserPicture>,
}

#[derive(Deserialize)]
struct RandomUserName {
    first: String,
    last: String,
}

#[derive(Deserialize)]
struct RandomUserLogin {
    uuid: String,
}

#[derive(Deserialize)]
struct RandomUserPicture {
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<RandomUser> for SeedProfile {
    fn from(u: RandomUser) -> Self {
        SeedProfile {
            id: u.login.uuid,
            name: format!("{} {}", u.name.first, u.name.last),
            avatar: u.picture.and_then(|p| p.thumbnail).unwrap_or_default(),
        }
    }
}

/// Parse seed JSON text; `path` is only used for error messages
pub fn parse_seed(text: &str, path: &Path) -> Result<Vec<SeedProfile>, SeedError> {
    let parsed: SeedFile = serde_json::from_str(text).map_err(|e| SeedError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let profiles = match parsed {
        SeedFile::Profiles(p) => p,
        SeedFile::RandomUser { results } => results.into_iter().map(SeedProfile::from).collect(),
    };
    if profiles.is_empty() {
        return Err(SeedError::Empty(path.to_path_buf()));
    }
    Ok(profiles)
}

impl SeedSource for FileSeed {
    fn fetch(&self) -> Result<Vec<SeedProfile>, SeedError> {
        let text = fs::read_to_string(&self.path).map_err(|e| SeedError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        parse_seed(&text, &self.path)
    }
}

/// Pick the seed source: a file when configured, else the built-in roster
pub fn source_for(file: Option<&Path>) -> Box<dyn SeedSource> {
    match file {
        Some(path) => Box::new(FileSeed::new(path)),
        None => Box::new(BuiltinSeed),
    }
}

const SEED_STATUSES: [Status; 4] = [Status::Working, Status::Break, Status::Meeting, Status::Offline];

/// Turn profiles into members. Statuses rotate through the four values and
/// every other member starts with two open tasks.
pub fn members_from_profiles(profiles: Vec<SeedProfile>, now: DateTime<Utc>) -> Vec<Member> {
    profiles
        .into_iter()
        .enumerate()
        .map(|(idx, p)| {
            let avatar = if p.avatar.is_empty() {
                DEFAULT_AVATAR.to_string()
            } else {
                p.avatar
            };
            let mut member = Member::new(p.id, p.name, avatar, now);
            member.status = SEED_STATUSES[idx % SEED_STATUSES.len()];
            if idx % 2 == 0 {
                let mut report = Task::new(
                    format!("{idx}-t1"),
                    "Prepare report".into(),
                    now + TimeDelta::days(3),
                );
                report.set_progress(20);
                let bug = Task::new(
                    format!("{idx}-t2"),
                    "Fix dashboard bug".into(),
                    now + TimeDelta::days(5),
                );
                member.tasks = vec![report, bug];
            }
            member
        })
        .collect()
}
