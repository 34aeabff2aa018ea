//! Fruit descriptors and the immutable [`Fruit`] input record.
//!
//! The size, ripeness, and type descriptors are closed enums with
//! associated factor tables; unknown tags are rejected at construction
//! (or at parse time via [`FromStr`]). A [`Fruit`] derives its potential
//! juice and waste purely from its own fields.
//!
//! Factor tables follow USDA-style properties for citrus fruits: each
//! type carries a juice factor (fraction of weight extractable as
//! juice), a density in g/ml, and a peel ratio (fraction of weight that
//! is peel).

use core::ops::RangeInclusive;
use core::str::FromStr;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::FruitId;
use crate::volume::JuiceVolume;

// ---------------------------------------------------------------------------
// FruitSize
// ---------------------------------------------------------------------------

/// Size class of a fruit, mapping to a weight range and a juice factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitSize {
    /// 80-120 g, juice factor 0.4.
    Small,
    /// 121-180 g, juice factor 0.5.
    Medium,
    /// 181-250 g, juice factor 0.6.
    Large,
}

impl FruitSize {
    /// The inclusive weight range in grams for this size class.
    pub const fn weight_range(self) -> RangeInclusive<u32> {
        match self {
            Self::Small => 80..=120,
            Self::Medium => 121..=180,
            Self::Large => 181..=250,
        }
    }

    /// Fraction of the fruit's weight that the press can reach.
    pub fn juice_factor(self) -> Decimal {
        match self {
            Self::Small => Decimal::new(4, 1),
            Self::Medium => Decimal::new(5, 1),
            Self::Large => Decimal::new(6, 1),
        }
    }

    /// Lowercase tag used on the wire and in the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for FruitSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(ValidationError::UnknownFruitSize(other.to_owned())),
        }
    }
}

impl core::fmt::Display for FruitSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RipenessLevel
// ---------------------------------------------------------------------------

/// Ripeness of a fruit, mapping to a juice extraction factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RipenessLevel {
    /// Green, less juice (factor 0.5).
    Unripe,
    /// Optimal juicing (factor 0.8).
    Ripe,
    /// Soft, more pulp (factor 0.7).
    Overripe,
}

impl RipenessLevel {
    /// Juice extraction factor for this ripeness level.
    pub fn factor(self) -> Decimal {
        match self {
            Self::Unripe => Decimal::new(5, 1),
            Self::Ripe => Decimal::new(8, 1),
            Self::Overripe => Decimal::new(7, 1),
        }
    }

    /// Short human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Unripe => "Green, less juice",
            Self::Ripe => "Optimal juicing",
            Self::Overripe => "Soft, more pulp",
        }
    }

    /// Lowercase tag used on the wire and in the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unripe => "unripe",
            Self::Ripe => "ripe",
            Self::Overripe => "overripe",
        }
    }
}

impl FromStr for RipenessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unripe" => Ok(Self::Unripe),
            "ripe" => Ok(Self::Ripe),
            "overripe" => Ok(Self::Overripe),
            other => Err(ValidationError::UnknownRipeness(other.to_owned())),
        }
    }
}

impl core::fmt::Display for RipenessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FruitType
// ---------------------------------------------------------------------------

/// Kind of citrus fruit, carrying juiciness, density, and peel ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitType {
    /// Juice factor 0.50, density 1.04 g/ml, peel ratio 0.30.
    #[default]
    Orange,
    /// Less juicy, thicker peel: 0.40 / 1.03 / 0.35.
    Lemon,
    /// Medium juiciness, thick peel and membranes: 0.45 / 1.05 / 0.40.
    Grapefruit,
}

impl FruitType {
    /// Fraction of the fruit's weight that becomes juice.
    pub fn juice_factor(self) -> Decimal {
        match self {
            Self::Orange => Decimal::new(50, 2),
            Self::Lemon => Decimal::new(40, 2),
            Self::Grapefruit => Decimal::new(45, 2),
        }
    }

    /// Density in grams per milliliter.
    pub fn density(self) -> Decimal {
        match self {
            Self::Orange => Decimal::new(104, 2),
            Self::Lemon => Decimal::new(103, 2),
            Self::Grapefruit => Decimal::new(105, 2),
        }
    }

    /// Fraction of the fruit's weight that is peel.
    pub fn peel_ratio(self) -> Decimal {
        match self {
            Self::Orange => Decimal::new(30, 2),
            Self::Lemon => Decimal::new(35, 2),
            Self::Grapefruit => Decimal::new(40, 2),
        }
    }

    /// Lowercase tag used on the wire and in the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Lemon => "lemon",
            Self::Grapefruit => "grapefruit",
        }
    }
}

impl FromStr for FruitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orange" => Ok(Self::Orange),
            "lemon" => Ok(Self::Lemon),
            "grapefruit" => Ok(Self::Grapefruit),
            other => Err(ValidationError::UnknownFruitType(other.to_owned())),
        }
    }
}

impl core::fmt::Display for FruitType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fruit
// ---------------------------------------------------------------------------

/// An immutable fruit fed into the machine.
///
/// All derivations are pure functions of the fields below; a `Fruit`
/// never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    id: FruitId,
    fruit_type: FruitType,
    size: FruitSize,
    ripeness: RipenessLevel,
    weight_grams: Decimal,
}

impl Fruit {
    /// Create a fruit with an explicit weight in grams.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveWeight`] if the weight is
    /// zero or negative.
    pub fn new(
        fruit_type: FruitType,
        size: FruitSize,
        ripeness: RipenessLevel,
        weight_grams: Decimal,
    ) -> Result<Self, ValidationError> {
        if weight_grams.is_sign_negative() || weight_grams.is_zero() {
            return Err(ValidationError::NonPositiveWeight(weight_grams));
        }
        Ok(Self {
            id: FruitId::new(),
            fruit_type,
            size,
            ripeness,
            weight_grams,
        })
    }

    /// Create a fruit with a weight drawn uniformly from the size's
    /// weight range.
    pub fn with_random_weight(
        fruit_type: FruitType,
        size: FruitSize,
        ripeness: RipenessLevel,
        rng: &mut impl Rng,
    ) -> Self {
        let grams: u32 = rng.random_range(size.weight_range());
        Self {
            id: FruitId::new(),
            fruit_type,
            size,
            ripeness,
            weight_grams: Decimal::from(grams),
        }
    }

    /// This fruit's unique identifier.
    pub const fn id(&self) -> FruitId {
        self.id
    }

    /// The kind of citrus.
    pub const fn fruit_type(&self) -> FruitType {
        self.fruit_type
    }

    /// The size class.
    pub const fn size(&self) -> FruitSize {
        self.size
    }

    /// The ripeness level.
    pub const fn ripeness(&self) -> RipenessLevel {
        self.ripeness
    }

    /// Weight in grams.
    pub const fn weight_grams(&self) -> Decimal {
        self.weight_grams
    }

    /// Juice obtainable from this fruit before any unit efficiency is
    /// applied.
    ///
    /// `weight * size.juice_factor * ripeness.factor * type.juice_factor
    /// / type.density`, in milliliters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ArithmeticOverflow`] if checked
    /// arithmetic fails.
    pub fn potential_juice_volume(&self) -> Result<JuiceVolume, ValidationError> {
        let milliliters = self
            .weight_grams
            .checked_mul(self.size.juice_factor())
            .and_then(|v| v.checked_mul(self.ripeness.factor()))
            .and_then(|v| v.checked_mul(self.fruit_type.juice_factor()))
            .and_then(|v| v.checked_div(self.fruit_type.density()))
            .ok_or(ValidationError::ArithmeticOverflow)?;
        JuiceVolume::new(milliliters)
    }

    /// Waste in grams left after juicing: the peel plus a tenth of the
    /// remaining mass (pulp and seeds), rounded to 2 decimal places.
    ///
    /// Always between zero and the fruit's weight.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ArithmeticOverflow`] if checked
    /// arithmetic fails.
    pub fn potential_waste(&self) -> Result<Decimal, ValidationError> {
        // 10% of the non-peel mass is lost as pulp and seeds.
        let pulp_ratio = Decimal::new(10, 2);
        let peel = self
            .weight_grams
            .checked_mul(self.fruit_type.peel_ratio())
            .ok_or(ValidationError::ArithmeticOverflow)?;
        let other = self
            .weight_grams
            .checked_sub(peel)
            .and_then(|rest| rest.checked_mul(pulp_ratio))
            .ok_or(ValidationError::ArithmeticOverflow)?;
        let waste = peel
            .checked_add(other)
            .ok_or(ValidationError::ArithmeticOverflow)?;
        Ok(waste.round_dp(2))
    }
}
