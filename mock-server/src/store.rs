//! In-memory state and operation semantics for the mock API.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Text a pad receives when created without explicit text.
pub const DEFAULT_PAD_TEXT: &str = "Welcome to Etherpad!\n";

/// Envelope failure for an operation that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Code 1: a parameter is missing or refers to something that does not
    /// exist.
    WrongParameters(String),
    /// Code 3: the operation name is unknown.
    NoSuchFunction,
}

impl Failure {
    pub fn code(&self) -> i64 {
        match self {
            Failure::WrongParameters(_) => 1,
            Failure::NoSuchFunction => 3,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Failure::WrongParameters(message) => message,
            Failure::NoSuchFunction => "no such function",
        }
    }
}

fn wrong(message: impl Into<String>) -> Failure {
    Failure::WrongParameters(message.into())
}

type Outcome = Result<Value, Failure>;

/// Request parameters with required/optional lookups.
struct Args<'a>(&'a HashMap<String, String>);

impl<'a> Args<'a> {
    fn required(&self, key: &str) -> Result<&'a str, Failure> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| wrong(format!("{key} is required")))
    }

    fn optional(&self, key: &str) -> Option<&'a str> {
        self.0.get(key).map(String::as_str)
    }

    fn number(&self, key: &str) -> Result<Option<u64>, Failure> {
        self.optional(key)
            .map(|raw| raw.parse().map_err(|_| wrong(format!("{key} is not a number"))))
            .transpose()
    }
}

#[derive(Debug, Clone)]
struct Session {
    group_id: String,
    author_id: String,
    valid_until: u64,
}

impl Session {
    fn to_json(&self) -> Value {
        json!({
            "groupID": self.group_id,
            "authorID": self.author_id,
            "validUntil": self.valid_until,
        })
    }
}

#[derive(Debug, Clone)]
struct Pad {
    revisions: Vec<String>,
    read_only_id: String,
    public: bool,
    password: Option<String>,
    authors: BTreeSet<String>,
    last_edited: u64,
}

impl Pad {
    fn new(text: Option<&str>) -> Self {
        Self {
            revisions: vec![normalize(text.unwrap_or(DEFAULT_PAD_TEXT))],
            read_only_id: new_id("r"),
            public: false,
            password: None,
            authors: BTreeSet::new(),
            last_edited: now_millis(),
        }
    }

    fn head(&self) -> u64 {
        self.revisions.len() as u64 - 1
    }

    fn text_at(&self, rev: Option<u64>) -> Result<&str, Failure> {
        let rev = rev.unwrap_or_else(|| self.head());
        if rev > self.head() {
            return Err(wrong("rev is higher than the head revision of the pad"));
        }
        Ok(&self.revisions[rev as usize])
    }
}

/// All mock server state. Every method maps to one API operation.
#[derive(Debug, Default)]
pub struct Store {
    groups: BTreeSet<String>,
    group_mappers: HashMap<String, String>,
    authors: BTreeMap<String, Option<String>>,
    author_mappers: HashMap<String, String>,
    sessions: BTreeMap<String, Session>,
    pads: BTreeMap<String, Pad>,
}

impl Store {
    /// Run `operation` with `params` and return the envelope's `data`.
    pub fn call(&mut self, operation: &str, params: &HashMap<String, String>) -> Outcome {
        let args = Args(params);
        match operation {
            "createGroup" => Ok(self.create_group()),
            "createGroupIfNotExistsFor" => {
                self.create_group_if_not_exists_for(args.required("groupMapper")?)
            }
            "deleteGroup" => self.delete_group(args.required("groupID")?),
            "listPads" => self.list_pads(args.required("groupID")?),
            "createGroupPad" => self.create_group_pad(
                args.required("groupID")?,
                args.required("padName")?,
                args.optional("text"),
            ),
            "listSessionsOfGroup" => {
                let group_id = args.required("groupID")?;
                self.group(group_id)?;
                Ok(self.sessions_where(|s| s.group_id == group_id))
            }

            "createAuthor" => Ok(self.create_author(args.optional("name"))),
            "createAuthorIfNotExistsFor" => Ok(self.create_author_if_not_exists_for(
                args.required("authorMapper")?,
                args.optional("name"),
            )),
            "listPadsOfAuthor" => {
                let author_id = args.required("authorID")?;
                self.author(author_id)?;
                let pad_ids: Vec<&String> = self
                    .pads
                    .iter()
                    .filter(|(_, pad)| pad.authors.contains(author_id))
                    .map(|(id, _)| id)
                    .collect();
                Ok(json!({ "padIDs": pad_ids }))
            }
            "listSessionsOfAuthor" => {
                let author_id = args.required("authorID")?;
                self.author(author_id)?;
                Ok(self.sessions_where(|s| s.author_id == author_id))
            }

            "createSession" => self.create_session(
                args.required("groupID")?,
                args.required("authorID")?,
                args.required("validUntil")?,
            ),
            "deleteSession" => {
                let session_id = args.required("sessionID")?;
                self.sessions
                    .remove(session_id)
                    .map(|_| Value::Null)
                    .ok_or_else(|| wrong("sessionID does not exist"))
            }
            "getSessionInfo" => {
                let session_id = args.required("sessionID")?;
                self.sessions
                    .get(session_id)
                    .map(Session::to_json)
                    .ok_or_else(|| wrong("sessionID does not exist"))
            }

            "getText" => {
                let text = self.pad(args.required("padID")?)?.text_at(args.number("rev")?)?;
                Ok(json!({ "text": text }))
            }
            "setText" => {
                let text = args.required("text")?;
                let pad = self.pad_mut(args.required("padID")?)?;
                pad.revisions.push(normalize(text));
                pad.last_edited = now_millis();
                Ok(Value::Null)
            }
            "getHTML" => {
                let text = self.pad(args.required("padID")?)?.text_at(args.number("rev")?)?;
                Ok(json!({ "html": render_html(text) }))
            }

            "createPad" => self.create_pad(args.required("padID")?, args.optional("text")),
            "getRevisionsCount" => {
                let pad = self.pad(args.required("padID")?)?;
                Ok(json!({ "revisions": pad.head() }))
            }
            "padUsersCount" => {
                self.pad(args.required("padID")?)?;
                Ok(json!({ "padUsersCount": 0 }))
            }
            "deletePad" => {
                let pad_id = args.required("padID")?;
                self.pads
                    .remove(pad_id)
                    .map(|_| Value::Null)
                    .ok_or_else(|| wrong("padID does not exist"))
            }
            "getReadOnlyID" => {
                let pad = self.pad(args.required("padID")?)?;
                Ok(json!({ "readOnlyID": pad.read_only_id }))
            }
            "setPublicStatus" => {
                let public = args.required("publicStatus")? == "true";
                self.group_pad_mut(args.required("padID")?, "publicStatus")?.public = public;
                Ok(Value::Null)
            }
            "getPublicStatus" => {
                let pad = self.group_pad_mut(args.required("padID")?, "publicStatus")?;
                Ok(json!({ "publicStatus": pad.public }))
            }
            "setPassword" => {
                let password = args.required("password")?;
                let pad = self.group_pad_mut(args.required("padID")?, "password")?;
                pad.password = Some(password.to_string()).filter(|p| !p.is_empty());
                Ok(Value::Null)
            }
            "isPasswordProtected" => {
                let pad = self.group_pad_mut(args.required("padID")?, "password")?;
                Ok(json!({ "isPasswordProtected": pad.password.is_some() }))
            }
            "listAuthorsOfPad" => {
                let pad = self.pad(args.required("padID")?)?;
                Ok(json!({ "authorIDs": pad.authors }))
            }
            "getLastEdited" => {
                let pad = self.pad(args.required("padID")?)?;
                Ok(json!({ "lastEdited": pad.last_edited }))
            }

            _ => Err(Failure::NoSuchFunction),
        }
    }

    /// Record `author_id` as a contributor of `pad_id`. Lets tests exercise
    /// the author listings, which no API operation populates.
    pub fn add_pad_author(&mut self, pad_id: &str, author_id: &str) -> bool {
        match self.pads.get_mut(pad_id) {
            Some(pad) => pad.authors.insert(author_id.to_string()),
            None => false,
        }
    }

    fn group(&self, group_id: &str) -> Result<(), Failure> {
        if self.groups.contains(group_id) {
            Ok(())
        } else {
            Err(wrong("groupID does not exist"))
        }
    }

    fn author(&self, author_id: &str) -> Result<(), Failure> {
        if self.authors.contains_key(author_id) {
            Ok(())
        } else {
            Err(wrong("authorID does not exist"))
        }
    }

    fn pad(&self, pad_id: &str) -> Result<&Pad, Failure> {
        self.pads.get(pad_id).ok_or_else(|| wrong("padID does not exist"))
    }

    fn pad_mut(&mut self, pad_id: &str) -> Result<&mut Pad, Failure> {
        self.pads
            .get_mut(pad_id)
            .ok_or_else(|| wrong("padID does not exist"))
    }

    /// Public status and passwords only exist on group pads.
    fn group_pad_mut(&mut self, pad_id: &str, setting: &str) -> Result<&mut Pad, Failure> {
        let pad = self.pad_mut(pad_id)?;
        if !pad_id.contains('$') {
            return Err(wrong(format!(
                "You can only get/set the {setting} of pads that belong to a group"
            )));
        }
        Ok(pad)
    }

    /// Matching sessions keyed by ID, or `null` when there are none.
    fn sessions_where(&self, keep: impl Fn(&Session) -> bool) -> Value {
        let matching: Map<String, Value> = self
            .sessions
            .iter()
            .filter(|(_, session)| keep(session))
            .map(|(id, session)| (id.clone(), session.to_json()))
            .collect();
        if matching.is_empty() {
            Value::Null
        } else {
            Value::Object(matching)
        }
    }

    fn create_group(&mut self) -> Value {
        let group_id = new_id("g");
        self.groups.insert(group_id.clone());
        json!({ "groupID": group_id })
    }

    fn create_group_if_not_exists_for(&mut self, mapper: &str) -> Outcome {
        if let Some(group_id) = self.group_mappers.get(mapper) {
            if self.groups.contains(group_id) {
                return Ok(json!({ "groupID": group_id }));
            }
        }
        let created = self.create_group();
        if let Some(group_id) = created["groupID"].as_str() {
            self.group_mappers
                .insert(mapper.to_string(), group_id.to_string());
        }
        Ok(created)
    }

    fn delete_group(&mut self, group_id: &str) -> Outcome {
        if !self.groups.remove(group_id) {
            return Err(wrong("groupID does not exist"));
        }
        let prefix = format!("{group_id}$");
        self.pads.retain(|pad_id, _| !pad_id.starts_with(&prefix));
        self.sessions.retain(|_, session| session.group_id != group_id);
        self.group_mappers.retain(|_, mapped| mapped.as_str() != group_id);
        Ok(Value::Null)
    }

    fn list_pads(&self, group_id: &str) -> Outcome {
        self.group(group_id)?;
        let prefix = format!("{group_id}$");
        let pad_ids: Vec<&String> = self
            .pads
            .keys()
            .filter(|id| id.starts_with(&prefix))
            .collect();
        Ok(json!({ "padIDs": pad_ids }))
    }

    fn create_group_pad(&mut self, group_id: &str, pad_name: &str, text: Option<&str>) -> Outcome {
        self.group(group_id)?;
        let pad_id = format!("{group_id}${pad_name}");
        if self.pads.contains_key(&pad_id) {
            return Err(wrong("padName does already exist"));
        }
        self.pads.insert(pad_id.clone(), Pad::new(text));
        Ok(json!({ "padID": pad_id }))
    }

    fn create_author(&mut self, name: Option<&str>) -> Value {
        let author_id = new_id("a");
        self.authors
            .insert(author_id.clone(), name.map(str::to_string));
        json!({ "authorID": author_id })
    }

    fn create_author_if_not_exists_for(&mut self, mapper: &str, name: Option<&str>) -> Value {
        let author_id = match self.author_mappers.get(mapper) {
            Some(author_id) => author_id.clone(),
            None => {
                let author_id = new_id("a");
                self.author_mappers
                    .insert(mapper.to_string(), author_id.clone());
                author_id
            }
        };
        let entry = self.authors.entry(author_id.clone()).or_default();
        if let Some(name) = name {
            *entry = Some(name.to_string());
        }
        json!({ "authorID": author_id })
    }

    fn create_session(&mut self, group_id: &str, author_id: &str, valid_until: &str) -> Outcome {
        if !self.groups.contains(group_id) {
            return Err(wrong("groupID doesn't exist"));
        }
        if !self.authors.contains_key(author_id) {
            return Err(wrong("authorID doesn't exist"));
        }
        let valid_until: u64 = valid_until
            .parse()
            .map_err(|_| wrong("validUntil is not a number"))?;
        if valid_until < now_millis() / 1000 {
            return Err(wrong("validUntil is in the past"));
        }

        let session_id = new_id("s");
        self.sessions.insert(
            session_id.clone(),
            Session {
                group_id: group_id.to_string(),
                author_id: author_id.to_string(),
                valid_until,
            },
        );
        Ok(json!({ "sessionID": session_id }))
    }

    fn create_pad(&mut self, pad_id: &str, text: Option<&str>) -> Outcome {
        if pad_id.contains('$') {
            return Err(wrong(
                "createPad can't create group pads, use createGroupPad instead",
            ));
        }
        if self.pads.contains_key(pad_id) {
            return Err(wrong("padID does already exist"));
        }
        self.pads.insert(pad_id.to_string(), Pad::new(text));
        Ok(Value::Null)
    }
}

/// `{prefix}.` followed by 16 random lowercase hex characters.
fn new_id(prefix: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{prefix}.{}", &simple[..16])
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Stored pad text always ends with a newline.
fn normalize(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

fn render_html(text: &str) -> String {
    let body = text
        .trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            line.replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
        })
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<!DOCTYPE HTML><html><body>{body}<br></body></html>")
}
