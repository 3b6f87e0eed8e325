use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

const SCALE: i64 = 10_000;

#[derive(Debug, Clone, Copy, Default)]
/// A monetary amount held as a fixed-point integer with 4 decimal places.
///
/// # Why Use Money? It is a Value Object.
/// Balances are maintained incrementally: every transaction adds its effect
/// and every deletion subtracts the very same value. With an integer
/// representation `x + a - a == x` always holds, which floating point cannot
/// promise. Amounts are parsed through `BigDecimal` so decimal input such as
/// `"0.1"` is read exactly.
///
/// # Examples
/// ```
/// use finance_ledger::common::money::Money;
///
/// let amount = Money::new(1000); // Represents 0.1000 in currency
/// assert_eq!(amount.as_i64(), 1000);
/// assert_eq!(amount.to_string_4dp(), "0.1000");
/// assert_eq!((-amount).to_string_4dp(), "-0.1000");
/// assert_eq!(amount.checked_add(-amount), Some(Money::zero()));
/// ```
///
/// There is no unchecked `+`: every sum goes through [`Money::checked_add`]
/// or [`Money::checked_sum`] and overflow surfaces as `None`.
pub struct Money(i64);

impl Money {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Adds up every amount, or `None` if the running total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, m| total.checked_add(m))
    }

    pub fn to_string_4dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.4}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }
        let bd: BigDecimal = t.parse()?;
        // Scale to 4 decimal places
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        // i64::MIN is refused so every amount can be negated.
        let value: i64 = scaled
            .to_i64()
            .filter(|v| *v != i64::MIN)
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;
        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_4dp())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts `"12.50"` as well as `12.5`; persisted snapshots use strings.
struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(|e| E::custom(format!("invalid amount {v:?}: {e}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(SCALE)
            .map(Money)
            .ok_or_else(|| E::custom("amount overflow"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount overflow"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be a finite number"));
        }
        self.visit_str(&v.to_string())
    }
}
