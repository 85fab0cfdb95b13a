use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::{Result, VssError};
use crate::session::parse_class_id;

/// Class identifier pulled from a decoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassId {
    /// Value of the `class` query parameter
    Known(String),
    /// No usable `class` parameter
    Unknown,
}

impl ClassId {
    /// The identifier, or `"unknown"`
    pub fn as_str(&self) -> &str {
        match self {
            ClassId::Known(id) => id,
            ClassId::Unknown => "unknown",
        }
    }

    /// True when a class id was extracted
    pub fn is_known(&self) -> bool {
        matches!(self, ClassId::Known(_))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lowercase hex SHA-256 of a student's ShareB file bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IntegrityToken(String);

impl IntegrityToken {
    /// Digest the bytes exactly as uploaded
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntegrityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured fields derived from one successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendancePayload {
    /// Decoded QR text, verbatim
    pub raw: String,
    /// Class id from the `class` query parameter
    pub class_id: ClassId,
    /// Binds the event to the student's ShareB without sending it
    pub integrity_token: IntegrityToken,
}

impl AttendancePayload {
    /// Build the payload from decoded text and the ShareB file bytes
    pub fn from_decoded(raw: impl Into<String>, share_b_bytes: &[u8]) -> Self {
        let raw = raw.into();
        let class_id = parse_class_id(&raw);
        Self {
            raw,
            class_id,
            integrity_token: IntegrityToken::of_bytes(share_b_bytes),
        }
    }

    /// Attach a student id, producing the record sent to the attendance endpoint
    pub fn record(&self, student_id: &str) -> Result<AttendanceRecord> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(VssError::InvalidStudentId(student_id.to_string()));
        }
        Ok(AttendanceRecord {
            student_id: student_id.to_string(),
            shareb_integrity_token: self.integrity_token.clone(),
            class_id: self.class_id.clone(),
            source_payload: self.raw.clone(),
        })
    }
}

/// Body of one attendance submission
///
/// Serialized keys match what the attendance endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    /// Submitting student
    pub student_id: String,
    /// Digest of the student's ShareB file
    #[serde(rename = "shareb_hash")]
    pub shareb_integrity_token: IntegrityToken,
    /// Class id, or `unknown`
    pub class_id: ClassId,
    /// Decoded QR text
    #[serde(rename = "source_url")]
    pub source_payload: String,
}

impl AttendanceRecord {
    /// JSON body for the attendance endpoint
    pub fn to_json(&self) -> String {
        // Plain strings only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_token_is_sha256_hex() {
        let token = IntegrityToken::of_bytes(b"abc");
        assert_eq!(
            token.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_record_json_keys() {
        let payload = AttendancePayload::from_decoded("https://example.com/api?class=101", b"share");
        let record = payload.record("s-001").unwrap();
        let value: serde_json::Value = serde_json::from_str(&record.to_json()).unwrap();

        assert_eq!(value["student_id"], "s-001");
        assert_eq!(value["class_id"], "101");
        assert_eq!(value["source_url"], "https://example.com/api?class=101");
        assert_eq!(value["shareb_hash"], payload.integrity_token.as_str());
    }

    #[test]
    fn test_unknown_class_serializes_as_sentinel() {
        let payload = AttendancePayload::from_decoded("hello world", b"share");
        assert_eq!(payload.class_id, ClassId::Unknown);
        let record = payload.record("s-002").unwrap();
        assert!(record.to_json().contains("\"class_id\":\"unknown\""));
    }

    #[test]
    fn test_blank_student_id_rejected() {
        let payload = AttendancePayload::from_decoded("x", b"share");
        assert!(matches!(
            payload.record("   "),
            Err(VssError::InvalidStudentId(_))
        ));
    }
}
