//! Best-effort storage of charts computed for identified callers.

use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::assembly::ComputedChart;
use crate::error::PersistError;
use crate::request::{BirthRequest, CallerId};

/// Identifier of a stored chart record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record id for a caller and input: hex SHA-256 over the trimmed caller and
/// the request fields. The same caller and input always give the same id,
/// whatever build or platform computed it.
pub fn record_id(caller: &CallerId, request: &BirthRequest) -> RecordId {
    let mut h = Sha256::new();
    id_field(&mut h, Some(caller.as_str().trim()));
    id_field(&mut h, Some(request.name.as_str()));
    id_field(&mut h, Some(request.gender.as_str()));
    id_field(&mut h, Some(request.date.trim()));
    id_field(&mut h, Some(request.time.trim()));
    id_field(&mut h, Some(if request.true_solar_time { "1" } else { "0" }));
    id_field(&mut h, request.location.as_deref());
    id_field(&mut h, request.offset_minutes.map(|m| m.to_string()).as_deref());
    let coordinates = request
        .coordinates
        .map(|p| format!("{:016x},{:016x}", p.lat.to_bits(), p.lon.to_bits()));
    id_field(&mut h, coordinates.as_deref());
    id_field(&mut h, request.catalog.as_deref().map(str::trim));
    RecordId(hex::encode(h.finalize()))
}

/// Absent: a single 0 byte. Present: 1, the byte length as big-endian u32,
/// then the UTF-8 bytes.
fn id_field(h: &mut Sha256, value: Option<&str>) {
    match value {
        None => h.update([0u8]),
        Some(v) => {
            h.update([1u8]);
            h.update((v.len() as u32).to_be_bytes());
            h.update(v.as_bytes());
        }
    }
}

/// One stored record: the original input plus the computed chart.
#[derive(Serialize)]
struct StoredRecord<'a> {
    id: &'a RecordId,
    caller: &'a CallerId,
    request: &'a BirthRequest,
    chart: &'a ComputedChart,
}

/// Durable sink for computed charts.
pub trait ChartRepository: Send + Sync {
    fn name(&self) -> &str;

    fn save(
        &self,
        caller: &CallerId,
        request: &BirthRequest,
        chart: &ComputedChart,
    ) -> Result<RecordId, PersistError>;
}

impl<R: ChartRepository + ?Sized> ChartRepository for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn save(
        &self,
        caller: &CallerId,
        request: &BirthRequest,
        chart: &ComputedChart,
    ) -> Result<RecordId, PersistError> {
        (**self).save(caller, request, chart)
    }
}

/// Append-only JSON-lines file, one record per line.
#[derive(Debug)]
pub struct JsonLinesRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record in the file, oldest first.
    pub fn read_all(&self) -> Result<Vec<serde_json::Value>, PersistError> {
        let text = std::fs::read_to_string(&self.path)?;
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(PersistError::from))
            .collect()
    }
}

impl ChartRepository for JsonLinesRepository {
    fn name(&self) -> &str {
        "json-lines"
    }

    fn save(
        &self,
        caller: &CallerId,
        request: &BirthRequest,
        chart: &ComputedChart,
    ) -> Result<RecordId, PersistError> {
        let id = record_id(caller, request);
        let line = serde_json::to_string(&StoredRecord {
            id: &id,
            caller,
            request,
            chart,
        })?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| PersistError::Unavailable("writer lock poisoned".into()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        debug!(path = %self.path.display(), record = %id, "appended chart record");
        Ok(id)
    }
}

/// In-process repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<serde_json::Value>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records, oldest first.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChartRepository for MemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn save(
        &self,
        caller: &CallerId,
        request: &BirthRequest,
        chart: &ComputedChart,
    ) -> Result<RecordId, PersistError> {
        let id = record_id(caller, request);
        let value = serde_json::to_value(StoredRecord {
            id: &id,
            caller,
            request,
            chart,
        })?;
        self.records
            .lock()
            .map_err(|_| PersistError::Unavailable("record lock poisoned".into()))?
            .push(value);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_depends_on_caller_and_input() {
        let req = BirthRequest::new("1990-05-17", "08:30");
        let a = CallerId::new("alice");
        let b = CallerId::new("bob");
        assert_eq!(record_id(&a, &req), record_id(&a, &req.clone()));
        assert_ne!(record_id(&a, &req), record_id(&b, &req));
        let later = BirthRequest::new("1990-05-17", "08:31");
        assert_ne!(record_id(&a, &req), record_id(&a, &later));
        assert_eq!(record_id(&a, &req).0.len(), 64);
    }

    #[test]
    fn record_id_is_pinned() {
        let req = BirthRequest::new("1990-05-17", "08:30");
        assert_eq!(
            record_id(&CallerId::new("alice"), &req).0,
            "d7fa6af3169ad4c98bae52e9c9abe12047834ab24d89582d4a6f0e6bdc786635"
        );
        let classic = BirthRequest {
            catalog: Some("classic".into()),
            ..req
        };
        assert_eq!(
            record_id(&CallerId::new("alice"), &classic).0,
            "c166aa418e1c79d920a26e7cadf47dc6312395713e2823dd748efdbf0f00644c"
        );
    }

    #[test]
    fn record_id_trims_the_catalog_name() {
        let a = CallerId::new("alice");
        let mut padded = BirthRequest::new("1990-05-17", "08:30");
        padded.catalog = Some(" classic ".into());
        let mut plain = padded.clone();
        plain.catalog = Some("classic".into());
        assert_eq!(record_id(&a, &padded), record_id(&a, &plain));
        assert_eq!(record_id(&CallerId::new(" alice"), &plain), record_id(&a, &plain));
    }

    #[test]
    fn record_id_separates_absent_from_empty() {
        let a = CallerId::new("alice");
        let none = BirthRequest::new("1990-05-17", "08:30");
        let mut empty = none.clone();
        empty.location = Some(String::new());
        assert_ne!(record_id(&a, &none), record_id(&a, &empty));
    }

    #[test]
    fn record_id_ignores_surrounding_whitespace() {
        let a = CallerId::new("alice");
        assert_eq!(
            record_id(&a, &BirthRequest::new("1990-05-17", "08:30")),
            record_id(&a, &BirthRequest::new(" 1990-05-17", "08:30 "))
        );
    }

    #[test]
    fn read_all_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonLinesRepository::new(dir.path().join("none.jsonl"));
        assert!(matches!(repo.read_all(), Err(PersistError::Io(_))));
    }
}
