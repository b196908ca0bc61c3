use crate::config::LedgerConfig;
use crate::error::QuestError;
use serde::Serialize;
use tracing::debug;

/// DJB2 string hash: seed 5381, `hash * 33 + byte` with u32 wraparound.
pub fn djb2(text: &str) -> u32 {
    text.bytes().fold(5381u32, |hash, b| {
        (hash << 5).wrapping_add(hash).wrapping_add(u32::from(b))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectRecord {
    pub clue: String,
    pub suspect: String,
}

/// Separate-chaining hash table from clue text to suspect name.
///
/// Keys compare exactly. Each bucket keeps its chain oldest-first in memory;
/// lookups scan from the newest entry, matching a prepend-on-insert chain.
#[derive(Debug, Clone)]
pub struct SuspectLedger {
    buckets: Vec<Vec<SuspectRecord>>,
    len: usize,
}

impl SuspectLedger {
    pub fn new(config: LedgerConfig) -> Result<Self, QuestError> {
        if config.bucket_count == 0 {
            return Err(QuestError::InvalidBucketCount);
        }
        Ok(Self {
            buckets: vec![Vec::new(); config.bucket_count],
            len: 0,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_of(&self, clue: &str) -> usize {
        djb2(clue) as usize % self.buckets.len()
    }

    /// Associates `suspect` with `clue`, returning the suspect it replaced.
    pub fn upsert(&mut self, clue: &str, suspect: &str) -> Option<String> {
        let idx = self.bucket_of(clue);
        let chain = &mut self.buckets[idx];
        if let Some(record) = chain.iter_mut().rev().find(|r| r.clue == clue) {
            debug!(clue, from = %record.suspect, to = suspect, "overwriting suspect");
            return Some(std::mem::replace(&mut record.suspect, suspect.to_string()));
        }
        chain.push(SuspectRecord {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        });
        self.len += 1;
        debug!(clue, suspect, bucket = idx, "ledger entry added");
        None
    }

    pub fn lookup(&self, clue: &str) -> Option<&str> {
        self.buckets[self.bucket_of(clue)]
            .iter()
            .rev()
            .find(|r| r.clue == clue)
            .map(|r| r.suspect.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All records, bucket by bucket, newest first within a bucket.
    pub fn records(&self) -> impl Iterator<Item = &SuspectRecord> {
        self.buckets.iter().flat_map(|chain| chain.iter().rev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> SuspectLedger {
        SuspectLedger::new(LedgerConfig::default()).unwrap()
    }

    #[test]
    fn djb2_reference_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        // long keys wrap instead of overflowing
        let long = "x".repeat(64);
        let expected = long
            .bytes()
            .fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(b as u32));
        assert_eq!(djb2(&long), expected);
    }

    #[test]
    fn zero_buckets_rejected() {
        let err = SuspectLedger::new(LedgerConfig { bucket_count: 0 }).unwrap_err();
        assert!(matches!(err, QuestError::InvalidBucketCount));
    }

    #[test]
    fn upsert_and_lookup() {
        let mut ledger = ledger();
        assert_eq!(ledger.upsert("Key", "Helena"), None);
        assert_eq!(ledger.upsert("Footprints", "Otavio"), None);
        assert_eq!(ledger.lookup("Key"), Some("Helena"));
        assert_eq!(ledger.lookup("Footprints"), Some("Otavio"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn upsert_overwrites_existing_key() {
        let mut ledger = ledger();
        ledger.upsert("Knife", "Lucia");
        assert_eq!(ledger.upsert("Knife", "Otavio"), Some("Lucia".to_string()));
        assert_eq!(ledger.lookup("Knife"), Some("Otavio"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records().filter(|r| r.clue == "Knife").count(), 1);
    }

    #[test]
    fn missing_keys_are_absent() {
        let mut ledger = ledger();
        ledger.upsert("Key", "Helena");
        assert_eq!(ledger.lookup("Book"), None);
        // keys are case-sensitive
        assert_eq!(ledger.lookup("key"), None);
    }

    #[test]
    fn single_bucket_chains_everything() {
        let mut ledger = SuspectLedger::new(LedgerConfig { bucket_count: 1 }).unwrap();
        let pairs = [("Key", "Helena"), ("Book", "Helena"), ("Letter", "Lucia")];
        for (clue, suspect) in pairs {
            ledger.upsert(clue, suspect);
        }
        for (clue, suspect) in pairs {
            assert_eq!(ledger.lookup(clue), Some(suspect));
            assert_eq!(ledger.bucket_of(clue), 0);
        }
        // newest entry comes first in its chain
        let order: Vec<&str> = ledger.records().map(|r| r.clue.as_str()).collect();
        assert_eq!(order, vec!["Letter", "Book", "Key"]);
    }

    #[test]
    fn equal_keys_share_a_bucket() {
        let ledger = ledger();
        assert_eq!(ledger.bucket_count(), 23);
        assert_eq!(ledger.bucket_of("Empty perfume bottle"), ledger.bucket_of("Empty perfume bottle"));
        assert!(ledger.bucket_of("Torn letter on the nightstand") < 23);
    }
}
