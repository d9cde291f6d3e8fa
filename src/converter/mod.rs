//! UID → phone number conversion.
//!
//! The conversion is a pure function of the uid and the two tables held by
//! [`UidConverter`]: special mappings win, otherwise an MD5-derived number is
//! built from the prefix table, and a fixed-prefix backup generator covers
//! candidates that fail validation.

use std::collections::HashMap;

use md5::{Digest, Md5};
use tracing::{debug, warn};

pub mod error;
pub mod tables;
pub mod types;

pub use error::{ConversionError, ConversionResult, TableError, ValidationError};
pub use types::{Conversion, ConversionPath, PhoneNumber, Uid};

use tables::{FALLBACK_PREFIX, PHONE_LENGTH, PHONE_PREFIXES, SPECIAL_MAPPINGS};

pub const MIN_UID_LENGTH: usize = 9;
pub const MAX_UID_LENGTH: usize = 12;

const HASH_HEX_DIGITS: usize = 8;
const BACKUP_SUFFIX_LENGTH: usize = 8;
const BACKUP_SUFFIX_MODULUS: u64 = 100_000_000;

/// Trims the raw value and checks it is a 9-12 digit ASCII string.
pub fn validate_uid(raw: &str) -> Result<Uid, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NonNumeric);
    }

    let len = trimmed.len();
    if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&len) {
        return Err(ValidationError::LengthOutOfRange { len });
    }

    Ok(Uid::new_unchecked(trimmed.to_string()))
}

/// Holds the immutable prefix and special-mapping tables. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct UidConverter {
    prefixes: Vec<String>,
    special_mappings: HashMap<String, String>,
}

impl Default for UidConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl UidConverter {
    /// Converter with the built-in tables.
    pub fn new() -> Self {
        Self {
            prefixes: PHONE_PREFIXES.iter().map(|p| p.to_string()).collect(),
            special_mappings: default_special_mappings(),
        }
    }

    /// Built-in prefix table with a replacement special-mapping table.
    pub fn with_special_mappings(
        special_mappings: HashMap<String, String>,
    ) -> Result<Self, TableError> {
        Self::with_tables(
            PHONE_PREFIXES.iter().map(|p| p.to_string()).collect(),
            special_mappings,
        )
    }

    pub fn with_tables(
        prefixes: Vec<String>,
        special_mappings: HashMap<String, String>,
    ) -> Result<Self, TableError> {
        if prefixes.is_empty() {
            return Err(TableError::EmptyPrefixTable);
        }

        if let Some(bad) = prefixes
            .iter()
            .find(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(TableError::InvalidPrefix {
                prefix: bad.clone(),
            });
        }

        // 키는 검증을 통과한 형태 그대로여야 조회에 걸린다.
        for uid in special_mappings.keys() {
            match validate_uid(uid) {
                Ok(valid) if valid.as_str() == uid => {}
                Ok(_) => {
                    return Err(TableError::InvalidSpecialKey {
                        uid: uid.clone(),
                        reason: ValidationError::NonNumeric,
                    })
                }
                Err(reason) => {
                    return Err(TableError::InvalidSpecialKey {
                        uid: uid.clone(),
                        reason,
                    })
                }
            }
        }

        let converter = Self {
            prefixes,
            special_mappings,
        };

        for (uid, phone) in &converter.special_mappings {
            if !converter.validate_phone(phone) {
                warn!(
                    "Special mapping {} -> {} is not a valid phone number under the prefix table",
                    uid, phone
                );
            }
        }

        Ok(converter)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn special_mappings(&self) -> &HashMap<String, String> {
        &self.special_mappings
    }

    /// Validates and converts a raw uid into a phone number.
    pub fn convert(&self, raw: &str) -> ConversionResult<PhoneNumber> {
        self.convert_detailed(raw).map(|conversion| conversion.phone)
    }

    /// Same as [`convert`](Self::convert) but also reports the validated uid and the branch taken.
    pub fn convert_detailed(&self, raw: &str) -> ConversionResult<Conversion> {
        let uid = validate_uid(raw)?;

        if let Some(mapped) = self.special_mappings.get(uid.as_str()) {
            return Ok(Conversion {
                phone: PhoneNumber::new_unchecked(mapped.clone()),
                uid,
                path: ConversionPath::Special,
            });
        }

        let candidate = self.hash_candidate(&uid)?;
        if self.validate_phone(&candidate) {
            return Ok(Conversion {
                uid,
                phone: PhoneNumber::new_unchecked(candidate),
                path: ConversionPath::Hash,
            });
        }

        debug!(
            "Primary candidate {} for uid {} rejected, falling back to backup generator",
            candidate, uid
        );
        let phone = self.backup_phone(&uid)?;
        Ok(Conversion {
            uid,
            phone,
            path: ConversionPath::Backup,
        })
    }

    /// 11 digits, leading '1', and starts with some table prefix.
    pub fn validate_phone(&self, candidate: &str) -> bool {
        candidate.len() == PHONE_LENGTH
            && candidate.starts_with('1')
            && candidate.bytes().all(|b| b.is_ascii_digit())
            && self
                .prefixes
                .iter()
                .any(|prefix| candidate.starts_with(prefix.as_str()))
    }

    fn hash_candidate(&self, uid: &Uid) -> ConversionResult<String> {
        let digest = hex::encode(Md5::digest(uid.as_str().as_bytes()));
        let head = digest
            .get(..HASH_HEX_DIGITS)
            .ok_or_else(|| ConversionError::internal("digest is shorter than expected"))?;
        let hash_int = u32::from_str_radix(head, 16).map_err(|e| {
            ConversionError::internal(format!("digest prefix {:?} is not hex: {}", head, e))
        })?;

        let mut prefix = self.prefixes[hash_int as usize % self.prefixes.len()].as_str();
        if prefix.len() >= PHONE_LENGTH {
            prefix = FALLBACK_PREFIX;
        }
        let remaining = PHONE_LENGTH - prefix.len();

        let mut digits = hash_int.to_string();
        if digits.len() < remaining {
            digits = digits.repeat(remaining / digits.len() + 1);
        }

        let suffix: String = digits
            .chars()
            .take(remaining)
            .filter(|c| c.is_ascii_digit())
            .collect();

        Ok(format!("{}{:0<width$}", prefix, suffix, width = remaining))
    }

    fn backup_phone(&self, uid: &Uid) -> ConversionResult<PhoneNumber> {
        let value: u64 = uid.as_str().parse().map_err(|e| {
            ConversionError::internal(format!("backup generator failed: {}", e))
        })?;

        let digits = value.to_string();
        let tail = if digits.len() >= BACKUP_SUFFIX_LENGTH {
            digits[digits.len() - BACKUP_SUFFIX_LENGTH..].to_string()
        } else {
            format!("{:0>width$}", digits, width = BACKUP_SUFFIX_LENGTH)
        };
        let tail: u64 = tail.parse().map_err(|e| {
            ConversionError::internal(format!("backup generator failed: {}", e))
        })?;

        let candidate = format!(
            "{}{:0width$}",
            FALLBACK_PREFIX,
            tail % BACKUP_SUFFIX_MODULUS,
            width = BACKUP_SUFFIX_LENGTH
        );

        if self.validate_phone(&candidate) {
            Ok(PhoneNumber::new_unchecked(candidate))
        } else {
            Err(ConversionError::BackupGenerationFailed)
        }
    }
}

fn default_special_mappings() -> HashMap<String, String> {
    SPECIAL_MAPPINGS
        .iter()
        .map(|(uid, phone)| (uid.to_string(), phone.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(prefixes: &[&str]) -> UidConverter {
        UidConverter::with_tables(
            prefixes.iter().map(|p| p.to_string()).collect(),
            HashMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn validate_rejects_empty_and_blank() {
        assert_eq!(validate_uid(""), Err(ValidationError::EmptyInput));
        assert_eq!(validate_uid("   "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn validate_rejects_non_digits() {
        assert_eq!(validate_uid("abc123"), Err(ValidationError::NonNumeric));
        assert_eq!(validate_uid("12345 6789"), Err(ValidationError::NonNumeric));
        assert_eq!(validate_uid("-123456789"), Err(ValidationError::NonNumeric));
        // 전각 숫자는 ASCII가 아님
        assert_eq!(
            validate_uid("１２３４５６７８９"),
            Err(ValidationError::NonNumeric)
        );
    }

    #[test]
    fn validate_length_boundaries() {
        assert!(validate_uid("123456789").is_ok());
        assert!(validate_uid("123456789012").is_ok());
        assert_eq!(
            validate_uid("12345678"),
            Err(ValidationError::LengthOutOfRange { len: 8 })
        );
        assert_eq!(
            validate_uid("1234567890123"),
            Err(ValidationError::LengthOutOfRange { len: 13 })
        );
    }

    #[test]
    fn validate_returns_trimmed_digits() {
        let uid = validate_uid("  000123456  ").unwrap();
        assert_eq!(uid.as_str(), "000123456");
    }

    #[test]
    fn special_mapping_takes_precedence() {
        let converter = UidConverter::new();
        let conversion = converter.convert_detailed("100000000").unwrap();
        assert_eq!(conversion.phone, "13800138000");
        assert_eq!(conversion.path, ConversionPath::Special);
        assert_eq!(converter.convert("100000002").unwrap(), "13800138002");
    }

    #[test]
    fn hash_path_matches_known_values() {
        let converter = UidConverter::new();
        assert_eq!(converter.convert("123456789").unwrap(), "15563713474");
        assert_eq!(converter.convert("987654321").unwrap(), "18318579760");
        assert_eq!(converter.convert("555666777").unwrap(), "13323091209");
        assert_eq!(converter.convert("100000003").unwrap(), "14735693518");
    }

    #[test]
    fn conversion_is_deterministic_and_well_formed() {
        let converter = UidConverter::new();
        for n in 100_000_000u64..100_001_000 {
            let uid = n.to_string();
            let first = converter.convert(&uid).unwrap();
            let second = converter.convert(&uid).unwrap();
            assert_eq!(first, second);
            assert!(converter.validate_phone(first.as_str()), "{} -> {}", uid, first);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let converter = UidConverter::new();
        assert_eq!(
            converter.convert("  123456789  ").unwrap(),
            converter.convert("123456789").unwrap()
        );
    }

    #[test]
    fn validation_errors_are_wrapped() {
        let converter = UidConverter::new();
        assert_eq!(
            converter.convert("").unwrap_err(),
            ConversionError::Validation(ValidationError::EmptyInput)
        );
        assert_eq!(
            converter.convert("abc123").unwrap_err(),
            ConversionError::Validation(ValidationError::NonNumeric)
        );
        assert_eq!(
            converter.convert("123").unwrap_err(),
            ConversionError::Validation(ValidationError::LengthOutOfRange { len: 3 })
        );
        assert_eq!(
            converter.convert("12345678901234567890").unwrap_err(),
            ConversionError::Validation(ValidationError::LengthOutOfRange { len: 20 })
        );
    }

    #[test]
    fn invalid_primary_candidate_uses_backup() {
        // "0" 접두사는 '1'로 시작하지 않아 항상 탈락한다.
        let converter = tables(&["0", "1"]);

        let backup = converter.convert_detailed("100000004").unwrap();
        assert_eq!(backup.path, ConversionPath::Backup);
        assert_eq!(backup.phone, "13800000004");

        let primary = converter.convert_detailed("100000003").unwrap();
        assert_eq!(primary.path, ConversionPath::Hash);
        assert_eq!(primary.phone, "13569351853");
    }

    #[test]
    fn backup_fails_when_fallback_prefix_is_not_in_table() {
        let converter = tables(&["0"]);
        assert_eq!(
            converter.convert("123456789").unwrap_err(),
            ConversionError::BackupGenerationFailed
        );
    }

    #[test]
    fn overlong_prefix_falls_back_to_138() {
        let converter = tables(&["12345678901", "1"]);
        let conversion = converter.convert_detailed("100000004").unwrap();
        assert_eq!(conversion.path, ConversionPath::Hash);
        assert_eq!(conversion.phone, "13829831668");
    }

    #[test]
    fn validate_phone_checks_every_rule() {
        let converter = UidConverter::new();
        assert!(converter.validate_phone("13800138000"));
        assert!(converter.validate_phone("17031234567"));
        assert!(!converter.validate_phone("1380013800"));
        assert!(!converter.validate_phone("138001380001"));
        assert!(!converter.validate_phone("23800138000"));
        assert!(!converter.validate_phone("1380013800a"));
        // 1-9-x 대역은 테이블에 없음
        assert!(!converter.validate_phone("19000000000"));
    }

    #[test]
    fn with_tables_rejects_bad_tables() {
        assert_eq!(
            UidConverter::with_tables(vec![], HashMap::new()).unwrap_err(),
            TableError::EmptyPrefixTable
        );
        assert!(matches!(
            UidConverter::with_tables(vec!["13a".into()], HashMap::new()),
            Err(TableError::InvalidPrefix { .. })
        ));

        let mut special = HashMap::new();
        special.insert("123".to_string(), "13800138000".to_string());
        assert!(matches!(
            UidConverter::with_special_mappings(special),
            Err(TableError::InvalidSpecialKey {
                reason: ValidationError::LengthOutOfRange { len: 3 },
                ..
            })
        ));

        let mut padded = HashMap::new();
        padded.insert(" 123456789".to_string(), "13800138000".to_string());
        assert!(matches!(
            UidConverter::with_special_mappings(padded),
            Err(TableError::InvalidSpecialKey { .. })
        ));
    }

    #[test]
    fn replacement_special_mappings_replace_defaults() {
        let mut special = HashMap::new();
        special.insert("999999999".to_string(), "13912345678".to_string());
        let converter = UidConverter::with_special_mappings(special).unwrap();

        assert_eq!(converter.convert("999999999").unwrap(), "13912345678");
        assert_ne!(converter.convert("100000000").unwrap(), "13800138000");
    }

    #[test]
    fn special_value_outside_prefix_table_is_returned_verbatim() {
        let mut special = HashMap::new();
        special.insert("999999999".to_string(), "19000000000".to_string());
        let converter = UidConverter::with_special_mappings(special).unwrap();

        assert!(!converter.validate_phone("19000000000"));
        let conversion = converter.convert_detailed("999999999").unwrap();
        assert_eq!(conversion.phone, "19000000000");
        assert_eq!(conversion.path, ConversionPath::Special);
    }
}
