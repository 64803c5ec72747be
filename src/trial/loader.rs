use super::store::TrialStore;
use super::types::{
    scalar_text, Challenge, ChallengeType, Keypress, Layout, Provenance, TimeSpan, TrialItem,
    TrialMeta, TrialSet,
};
use crate::error::{EntryLabError, EntryResult};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_yml::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Accepts anything; a value that does not fit `T` is kept as unreadable instead of failing
/// the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Parsed(T),
    Unreadable(IgnoredAny),
}

impl<T> Lenient<T> {
    fn parsed(self) -> Option<T> {
        match self {
            Lenient::Parsed(v) => Some(v),
            Lenient::Unreadable(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    meta: Option<Lenient<TrialMeta>>,
    #[serde(default)]
    trial: Option<Lenient<Vec<RawEntry>>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Challenge {
        challenge: RawChallenge,
    },
    Command {
        command: Value,
        #[serde(default)]
        data: Option<Value>,
    },
    Unreadable(IgnoredAny),
}

#[derive(Deserialize)]
struct RawChallenge {
    #[serde(rename = "type")]
    kind: ChallengeType,
    layout: Layout,
    prompt: String,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    accuracy: Option<Value>,
    #[serde(default)]
    time: TimeSpan,
    #[serde(default, deserialize_with = "keypress_entries")]
    keypresses: Vec<(Value, Value)>,
}

/// Reads the `keypresses` mapping as ordered pairs.
///
/// Several presses in one frame can be written under the same timestamp key, so repeated
/// keys are kept as separate entries rather than rejected.
fn keypress_entries<'de, D>(deserializer: D) -> Result<Vec<(Value, Value)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(Value, Value)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of keypresses keyed by timestamp")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<Value, Value>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor)
}

impl RawChallenge {
    fn into_challenge(self) -> Challenge {
        let mut seen = HashSet::new();
        let keypresses = self
            .keypresses
            .iter()
            .map(|(k, body)| {
                let id = scalar_text(k).unwrap_or_default();
                if !seen.insert(id.clone()) {
                    debug!("Repeated keypress id {} in '{}'", id, self.prompt);
                }
                Keypress::from_value(id, body)
            })
            .collect();

        Challenge {
            kind: self.kind,
            layout: self.layout,
            prompt: self.prompt,
            output: self.output.unwrap_or_default(),
            recorded_accuracy: self.accuracy.as_ref().and_then(Value::as_f64),
            time: self.time,
            keypresses,
        }
    }
}

impl RawEntry {
    fn into_item(self) -> Option<TrialItem> {
        match self {
            RawEntry::Challenge { challenge } => {
                Some(TrialItem::Challenge(challenge.into_challenge()))
            }
            RawEntry::Command { command, data } => {
                let key = scalar_text(&command)?;
                let data = data.as_ref().and_then(scalar_text);
                Some(TrialItem::Command { key, data })
            }
            RawEntry::Unreadable(_) => None,
        }
    }
}

/// Parses the text of one trial record.
pub fn parse_trial(id: &str, text: &str) -> EntryResult<TrialSet> {
    let parse_error = |reason: String| EntryLabError::Parse {
        id: id.to_string(),
        reason,
    };

    let record: RawRecord = serde_yml::from_str(text).map_err(|e| parse_error(e.to_string()))?;

    let entries = record
        .trial
        .and_then(Lenient::parsed)
        .ok_or_else(|| parse_error("missing top-level `trial` sequence".to_string()))?;

    let meta = record.meta.and_then(Lenient::parsed);

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for (idx, entry) in entries.into_iter().enumerate() {
        match entry.into_item() {
            Some(item) => items.push(item),
            None => {
                warn!("⚠️  [{}] Skipping malformed entry #{}", id, idx);
                skipped += 1;
            }
        }
    }

    let set = TrialSet {
        provenance: Provenance::Source { id: id.to_string() },
        meta,
        items,
        skipped,
    };

    debug!(
        "Parsed '{}': {} challenges, {} items, {} skipped",
        id,
        set.challenge_count(),
        set.items.len(),
        set.skipped
    );

    Ok(set)
}

/// Reads and parses the record named `id` from `store`.
pub fn load_trial<S: TrialStore + ?Sized>(store: &S, id: &str) -> EntryResult<TrialSet> {
    let text = store.read(id)?;
    parse_trial(id, &text)
}

/// Loads every record the store knows about, in id order.
pub fn load_all<S: TrialStore + ?Sized>(store: &S) -> EntryResult<Vec<TrialSet>> {
    let ids = store.ids()?;
    info!("📂 Loading {} trial records", ids.len());
    ids.iter().map(|id| load_trial(store, id)).collect()
}

/// Concatenates trial sets in input order. Source metadata does not survive the merge.
pub fn merge<I>(trialsets: I) -> TrialSet
where
    I: IntoIterator<Item = TrialSet>,
{
    let mut items = Vec::new();
    let mut skipped = 0;

    for set in trialsets {
        items.extend(set.items);
        skipped += set.skipped;
    }

    TrialSet {
        provenance: Provenance::Merged,
        meta: None,
        items,
        skipped,
    }
}
