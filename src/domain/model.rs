use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Expected Beta hCG interval (mUI/mL) for one gestational week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub week: i64,
    pub lower: f64,
    pub upper: f64,
}

impl ReferenceRow {
    pub const fn new(week: i64, lower: f64, upper: f64) -> Self {
        Self { week, lower, upper }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, measurement: f64) -> bool {
        measurement >= self.lower && measurement <= self.upper
    }
}

pub const FIRST_WEEK: i64 = 3;
pub const LAST_WEEK: i64 = 16;

/// Values below this threshold are read as a negative test.
pub const NEGATIVE_THRESHOLD: f64 = 25.0;

/// Below this many elapsed weeks a negative result may be a false negative.
pub const EARLY_NEGATIVE_WEEKS: i64 = 4;

pub static REFERENCE_TABLE: [ReferenceRow; 14] = [
    ReferenceRow::new(3, 5.0, 50.0),
    ReferenceRow::new(4, 5.0, 426.0),
    ReferenceRow::new(5, 18.0, 7340.0),
    ReferenceRow::new(6, 1080.0, 56500.0),
    ReferenceRow::new(7, 7650.0, 229000.0),
    ReferenceRow::new(8, 7650.0, 229000.0),
    ReferenceRow::new(9, 25700.0, 288000.0),
    ReferenceRow::new(10, 25700.0, 288000.0),
    ReferenceRow::new(11, 25700.0, 288000.0),
    ReferenceRow::new(12, 25700.0, 288000.0),
    ReferenceRow::new(13, 13300.0, 254000.0),
    ReferenceRow::new(14, 13300.0, 254000.0),
    ReferenceRow::new(15, 13300.0, 254000.0),
    ReferenceRow::new(16, 13300.0, 254000.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MissingDate,
    InvalidMeasurement,
    NegativeEarly,
    NegativeLate,
    OutOfRange,
    NoReferenceRow,
    CompatibleRange,
    BelowExpected,
    AboveExpected,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MissingDate => "missing_date",
            Category::InvalidMeasurement => "invalid_measurement",
            Category::NegativeEarly => "negative_early",
            Category::NegativeLate => "negative_late",
            Category::OutOfRange => "out_of_range",
            Category::NoReferenceRow => "no_reference_row",
            Category::CompatibleRange => "compatible_range",
            Category::BelowExpected => "below_expected",
            Category::AboveExpected => "above_expected",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single classification, carrying the values its message is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResult {
    MissingDate,
    InvalidMeasurement {
        measurement: f64,
    },
    NegativeEarly {
        measurement: f64,
        elapsed_weeks: i64,
    },
    NegativeLate {
        measurement: f64,
        elapsed_weeks: i64,
    },
    OutOfRange {
        measurement: f64,
        elapsed_weeks: i64,
    },
    NoReferenceRow {
        measurement: f64,
        elapsed_weeks: i64,
    },
    CompatibleRange {
        measurement: f64,
        elapsed_weeks: i64,
        lower: f64,
        upper: f64,
    },
    BelowExpected {
        measurement: f64,
        elapsed_weeks: i64,
        lower: f64,
        upper: f64,
    },
    AboveExpected {
        measurement: f64,
        elapsed_weeks: i64,
        lower: f64,
        upper: f64,
    },
}

impl ClassificationResult {
    pub fn category(&self) -> Category {
        match self {
            ClassificationResult::MissingDate => Category::MissingDate,
            ClassificationResult::InvalidMeasurement { .. } => Category::InvalidMeasurement,
            ClassificationResult::NegativeEarly { .. } => Category::NegativeEarly,
            ClassificationResult::NegativeLate { .. } => Category::NegativeLate,
            ClassificationResult::OutOfRange { .. } => Category::OutOfRange,
            ClassificationResult::NoReferenceRow { .. } => Category::NoReferenceRow,
            ClassificationResult::CompatibleRange { .. } => Category::CompatibleRange,
            ClassificationResult::BelowExpected { .. } => Category::BelowExpected,
            ClassificationResult::AboveExpected { .. } => Category::AboveExpected,
        }
    }

    pub fn measurement(&self) -> Option<f64> {
        match self {
            ClassificationResult::MissingDate => None,
            ClassificationResult::InvalidMeasurement { measurement }
            | ClassificationResult::NegativeEarly { measurement, .. }
            | ClassificationResult::NegativeLate { measurement, .. }
            | ClassificationResult::OutOfRange { measurement, .. }
            | ClassificationResult::NoReferenceRow { measurement, .. }
            | ClassificationResult::CompatibleRange { measurement, .. }
            | ClassificationResult::BelowExpected { measurement, .. }
            | ClassificationResult::AboveExpected { measurement, .. } => Some(*measurement),
        }
    }

    pub fn elapsed_weeks(&self) -> Option<i64> {
        match self {
            ClassificationResult::MissingDate | ClassificationResult::InvalidMeasurement { .. } => {
                None
            }
            ClassificationResult::NegativeEarly { elapsed_weeks, .. }
            | ClassificationResult::NegativeLate { elapsed_weeks, .. }
            | ClassificationResult::OutOfRange { elapsed_weeks, .. }
            | ClassificationResult::NoReferenceRow { elapsed_weeks, .. }
            | ClassificationResult::CompatibleRange { elapsed_weeks, .. }
            | ClassificationResult::BelowExpected { elapsed_weeks, .. }
            | ClassificationResult::AboveExpected { elapsed_weeks, .. } => Some(*elapsed_weeks),
        }
    }

    /// `(lower, upper)` of the reference row the measurement was compared against.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            ClassificationResult::CompatibleRange { lower, upper, .. }
            | ClassificationResult::BelowExpected { lower, upper, .. }
            | ClassificationResult::AboveExpected { lower, upper, .. } => Some((*lower, *upper)),
            _ => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(
            self.category(),
            Category::NegativeEarly | Category::NegativeLate
        )
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Flat object: `category`, the values the variant carries, then the rendered `message`.
impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", &self.category())?;
        if let Some(measurement) = self.measurement() {
            map.serialize_entry("measurement", &measurement)?;
        }
        if let Some(elapsed_weeks) = self.elapsed_weeks() {
            map.serialize_entry("elapsed_weeks", &elapsed_weeks)?;
        }
        if let Some((lower, upper)) = self.bounds() {
            map.serialize_entry("lower", &lower)?;
            map.serialize_entry("upper", &upper)?;
        }
        map.serialize_entry("message", &self.message())?;
        map.end()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NEGATIVE: &str = "Resultado negativo (<25 mUI/mL): indica que, provavelmente, \
                                não há gestação em curso.";

        match self {
            ClassificationResult::MissingDate => {
                write!(f, "Data da última menstruação não informada")
            }
            ClassificationResult::InvalidMeasurement { .. } => {
                write!(f, "Valor de Beta hCG inválido")
            }
            ClassificationResult::NegativeEarly { .. } => write!(
                f,
                "{} Como a DUM é recente (menos de 4 semanas), existe possibilidade de falso \
                 negativo, sendo recomendado repetir o exame em 1 semana.",
                NEGATIVE
            ),
            ClassificationResult::NegativeLate { .. } => write!(f, "{}", NEGATIVE),
            ClassificationResult::OutOfRange { elapsed_weeks, .. } => write!(
                f,
                "Idade gestacional estimada ({} semanas) está fora do intervalo de interpretação \
                 desta calculadora ({}-{} semanas). É necessária avaliação médica.",
                elapsed_weeks, FIRST_WEEK, LAST_WEEK
            ),
            ClassificationResult::NoReferenceRow { elapsed_weeks, .. } => write!(
                f,
                "Não foi possível determinar a faixa de referência para {} semanas.",
                elapsed_weeks
            ),
            ClassificationResult::CompatibleRange {
                measurement,
                elapsed_weeks,
                lower,
                upper,
            } => write!(
                f,
                "Resultado positivo compatível com a idade gestacional: o valor de hCG \
                 ({:.1} mUI/mL) está dentro do intervalo esperado para {} semanas de gestação \
                 ({:.0}-{:.0} mUI/mL).",
                measurement, elapsed_weeks, lower, upper
            ),
            ClassificationResult::BelowExpected {
                measurement,
                elapsed_weeks,
                lower,
                upper,
            } => write!(
                f,
                "Resultado positivo abaixo do esperado: o valor de hCG ({:.1} mUI/mL) está abaixo \
                 do intervalo esperado para {} semanas ({:.0}-{:.0} mUI/mL). Pode indicar \
                 problemas na evolução da gravidez ou datação incorreta; é necessário \
                 acompanhamento médico.",
                measurement, elapsed_weeks, lower, upper
            ),
            ClassificationResult::AboveExpected {
                measurement,
                elapsed_weeks,
                lower,
                upper,
            } => write!(
                f,
                "Resultado positivo acima do esperado: o valor de hCG ({:.1} mUI/mL) está acima \
                 do intervalo esperado para {} semanas ({:.0}-{:.0} mUI/mL). Pode sugerir uma \
                 gestação gemelar ou erro de datação; também deve ser avaliado por um \
                 profissional de saúde.",
                measurement, elapsed_weeks, lower, upper
            ),
        }
    }
}
