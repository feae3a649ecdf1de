use std::{fmt, str::FromStr};

use num_bigint::{BigInt, Sign};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypesError;

/// Number of decimal places carried by `Dec`.
pub const PRECISION: usize = 18;

fn precision_multiplier() -> BigInt {
    BigInt::from(10u64).pow(PRECISION as u32)
}

/// Fixed point decimal with 18 digits of precision, the amount type of the chain's coins.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigInt);

impl Dec {
    pub fn zero() -> Self {
        Self(BigInt::from(0u8))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigInt::from(value) * precision_multiplier())
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn mul_u64(&self, value: u64) -> Self {
        Self(&self.0 * BigInt::from(value))
    }

    pub fn add(&self, other: &Dec) -> Self {
        Self(&self.0 + &other.0)
    }
}

impl FromStr for Dec {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(TypesError::invalid_decimal(s.to_string()));
                }
                (int_part, frac_part)
            }
            None => (s, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(TypesError::invalid_decimal(s.to_string()));
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(TypesError::invalid_decimal(s.to_string()));
        }

        if frac_part.len() > PRECISION {
            return Err(TypesError::decimal_precision(s.to_string(), PRECISION));
        }

        let combined = format!(
            "{}{}{}",
            if int_part.is_empty() { "0" } else { int_part },
            frac_part,
            "0".repeat(PRECISION - frac_part.len())
        );

        BigInt::from_str(&combined)
            .map(Self)
            .map_err(|_| TypesError::invalid_decimal(s.to_string()))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let multiplier = precision_multiplier();
        let sign = if self.0.sign() == Sign::Minus { "-" } else { "" };
        let (_, magnitude) = self.0.clone().into_parts();
        let magnitude = BigInt::from(magnitude);
        let int_part = &magnitude / &multiplier;
        let frac_part = &magnitude % &multiplier;

        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part.to_string(),
            width = PRECISION
        )
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: TypesError| de::Error::custom(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: &str, amount: Dec) -> Result<Self, TypesError> {
        validate_denom(denom)?;

        Ok(Self {
            denom: denom.to_string(),
            amount,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dec_coin(s)
    }
}

/// Denominations start with a lowercase letter followed by 2-127
/// alphanumerics or one of `/`, `:`, `.`, `_`, `-` (ibc denoms are `ibc/<HASH>`).
pub fn validate_denom(denom: &str) -> Result<(), TypesError> {
    let mut chars = denom.chars();
    let valid_head = matches!(chars.next(), Some(c) if c.is_ascii_lowercase());
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));

    if !valid_head || !valid_tail || denom.len() < 3 || denom.len() > 128 {
        return Err(TypesError::invalid_denom(denom.to_string()));
    }

    Ok(())
}

/// Parses a single decimal coin expression such as `1024.1024okt`.
pub fn parse_dec_coin(coin_str: &str) -> Result<DecCoin, TypesError> {
    let coin_str = coin_str.trim();
    let split_at = coin_str
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| TypesError::missing_denom(coin_str.to_string()))?;

    let (amount, denom) = coin_str.split_at(split_at);
    if amount.is_empty() {
        return Err(TypesError::invalid_decimal(coin_str.to_string()));
    }

    DecCoin::new(denom.trim(), amount.parse()?)
}

/// Parses a comma separated list of decimal coins. The result is sorted by
/// denomination; duplicated denominations are rejected. Empty input yields no coins.
pub fn parse_dec_coins(coins_str: &str) -> Result<Vec<DecCoin>, TypesError> {
    let coins_str = coins_str.trim();
    if coins_str.is_empty() {
        return Ok(vec![]);
    }

    let mut coins = coins_str
        .split(',')
        .map(parse_dec_coin)
        .collect::<Result<Vec<_>, _>>()?;

    coins.sort_by(|a, b| a.denom.cmp(&b.denom));
    if let Some(pair) = coins.windows(2).find(|pair| pair[0].denom == pair[1].denom) {
        return Err(TypesError::duplicate_denom(pair[0].denom.clone()));
    }

    Ok(coins)
}
