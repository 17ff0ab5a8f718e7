use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{Bleeding, Breathing, Consciousness, PainLevel, YesNo};
use super::ModelError;

/// Ages are valid strictly between these bounds.
pub const AGE_LOWER_BOUND: u32 = 0;
pub const AGE_UPPER_BOUND: u32 = 120;

/// The seven symptom fields tracked by extraction and triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomField {
    Breathing,
    Conscious,
    Bleeding,
    Dizziness,
    Vomiting,
    ChestPain,
    PainLevel,
}

impl SymptomField {
    /// Classifier evaluation order.
    pub const ALL: [SymptomField; 7] = [
        SymptomField::Breathing,
        SymptomField::Conscious,
        SymptomField::Bleeding,
        SymptomField::Dizziness,
        SymptomField::Vomiting,
        SymptomField::ChestPain,
        SymptomField::PainLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breathing => "breathing",
            Self::Conscious => "conscious",
            Self::Bleeding => "bleeding",
            Self::Dizziness => "dizziness",
            Self::Vomiting => "vomiting",
            Self::ChestPain => "chest_pain",
            Self::PainLevel => "pain_level",
        }
    }

    /// Parse a categorical label (e.g. a classifier prediction) into a typed
    /// value for this field. Labels outside the field's variants are rejected.
    pub fn parse_label(&self, label: &str) -> Result<FieldValue, ModelError> {
        let value = match self {
            Self::Breathing => FieldValue::Breathing(label.parse()?),
            Self::Conscious => FieldValue::Conscious(label.parse()?),
            Self::Bleeding => FieldValue::Bleeding(label.parse()?),
            Self::Dizziness => FieldValue::Dizziness(label.parse()?),
            Self::Vomiting => FieldValue::Vomiting(label.parse()?),
            Self::ChestPain => FieldValue::ChestPain(label.parse()?),
            Self::PainLevel => FieldValue::PainLevel(label.parse()?),
        };
        Ok(value)
    }
}

impl std::fmt::Display for SymptomField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved value for exactly one symptom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Breathing(Breathing),
    Conscious(Consciousness),
    Bleeding(Bleeding),
    Dizziness(YesNo),
    Vomiting(YesNo),
    ChestPain(YesNo),
    PainLevel(PainLevel),
}

impl FieldValue {
    pub fn field(&self) -> SymptomField {
        match self {
            Self::Breathing(_) => SymptomField::Breathing,
            Self::Conscious(_) => SymptomField::Conscious,
            Self::Bleeding(_) => SymptomField::Bleeding,
            Self::Dizziness(_) => SymptomField::Dizziness,
            Self::Vomiting(_) => SymptomField::Vomiting,
            Self::ChestPain(_) => SymptomField::ChestPain,
            Self::PainLevel(_) => SymptomField::PainLevel,
        }
    }
}

/// Structured symptom report.
///
/// Every field is optional: extraction leaves unresolved fields absent, and
/// the decision engine applies per-field defaults when reading. Absent
/// fields are omitted when serialized, so the same type is the partial
/// field map returned by extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breathing: Option<Breathing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conscious: Option<Consciousness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleeding: Option<Bleeding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_pain: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<PainLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vomiting: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dizziness: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl SymptomRecord {
    // ── Read-time defaults ──────────────────────────────────

    pub fn breathing(&self) -> Breathing {
        self.breathing.unwrap_or(Breathing::Unknown)
    }

    pub fn conscious(&self) -> Consciousness {
        self.conscious.unwrap_or(Consciousness::Unknown)
    }

    pub fn bleeding(&self) -> Bleeding {
        self.bleeding.unwrap_or(Bleeding::Unknown)
    }

    pub fn chest_pain(&self) -> YesNo {
        self.chest_pain.unwrap_or(YesNo::No)
    }

    pub fn pain_level(&self) -> PainLevel {
        self.pain_level.unwrap_or(PainLevel::None)
    }

    pub fn vomiting(&self) -> YesNo {
        self.vomiting.unwrap_or(YesNo::No)
    }

    pub fn dizziness(&self) -> YesNo {
        self.dizziness.unwrap_or(YesNo::No)
    }

    /// Age used for scoring: out-of-range or absent ages read as 0.
    pub fn scoring_age(&self) -> u32 {
        self.age.and_then(|a| checked_age(i64::from(a))).unwrap_or(0)
    }

    // ── Assignment ──────────────────────────────────────────

    pub fn is_resolved(&self, field: SymptomField) -> bool {
        match field {
            SymptomField::Breathing => self.breathing.is_some(),
            SymptomField::Conscious => self.conscious.is_some(),
            SymptomField::Bleeding => self.bleeding.is_some(),
            SymptomField::Dizziness => self.dizziness.is_some(),
            SymptomField::Vomiting => self.vomiting.is_some(),
            SymptomField::ChestPain => self.chest_pain.is_some(),
            SymptomField::PainLevel => self.pain_level.is_some(),
        }
    }

    pub fn assign(&mut self, value: FieldValue) {
        match value {
            FieldValue::Breathing(v) => self.breathing = Some(v),
            FieldValue::Conscious(v) => self.conscious = Some(v),
            FieldValue::Bleeding(v) => self.bleeding = Some(v),
            FieldValue::Dizziness(v) => self.dizziness = Some(v),
            FieldValue::Vomiting(v) => self.vomiting = Some(v),
            FieldValue::ChestPain(v) => self.chest_pain = Some(v),
            FieldValue::PainLevel(v) => self.pain_level = Some(v),
        }
    }

    /// Assign only if the field is still unresolved. Returns whether it was.
    pub fn assign_if_unresolved(&mut self, value: FieldValue) -> bool {
        if self.is_resolved(value.field()) {
            return false;
        }
        self.assign(value);
        true
    }

    // ── Lenient construction ────────────────────────────────

    /// Build a record from loosely-typed JSON (e.g. a form submission).
    ///
    /// Never fails: non-object input yields an empty record, values that are
    /// not a declared variant are treated as absent, and `age` accepts an
    /// integer, a float (truncated) or a numeric string.
    pub fn from_lenient_json(value: &Value) -> Self {
        let mut record = Self::default();
        let Some(obj) = value.as_object() else {
            return record;
        };

        for field in SymptomField::ALL {
            let parsed = obj
                .get(field.as_str())
                .and_then(Value::as_str)
                .and_then(|label| field.parse_label(label.trim()).ok());
            if let Some(v) = parsed {
                record.assign(v);
            }
        }

        record.age = obj.get("age").and_then(lenient_age);
        record
    }
}

/// Range-check an age: `Some` only for values strictly inside (0, 120).
pub fn checked_age(n: i64) -> Option<u32> {
    if n > i64::from(AGE_LOWER_BOUND) && n < i64::from(AGE_UPPER_BOUND) {
        u32::try_from(n).ok()
    } else {
        None
    }
}

fn lenient_age(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?
        }
        _ => return None,
    };
    checked_age(n)
}
