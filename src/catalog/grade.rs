//! Comparador de cotations
//!
//! Convierte un token de cotation (`"6b+"`, `"7a"`) en un rango entero
//! totalmente ordenado: el nivel numérico domina, luego la letra (a < b < c)
//! y por último el sufijo `+`.
//!
//! Un token mal formado nunca hace fallar una ordenación: simplemente no es
//! comparable y se trata como igual a cualquier otro.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref COTATION_RE: Regex =
        Regex::new(r"^([1-9])([abc])(\+)?$").expect("regex de cotation inválida");
}

/// Token que no respeta la forma `<cifra><letra>[+]`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cotation mal formée: '{0}'")]
pub struct MalformedGradeToken(pub String);

/// Cotation ya parseada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cotation {
    level: u8,
    letter: u8,
    plus: bool,
}

impl Cotation {
    /// Parsea un token. Ignora espacios alrededor y mayúsculas.
    pub fn parse(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_lowercase();
        let caps = COTATION_RE.captures(&normalized)?;

        let level = caps.get(1)?.as_str().parse::<u8>().ok()?;
        let letter = caps.get(2)?.as_str().bytes().next()? - b'a';
        let plus = caps.get(3).is_some();

        Some(Self { level, letter, plus })
    }

    /// Rango entero: `level*10 + letter*2 + plus`
    ///
    /// El `+` vale una unidad y cada letra dos, de modo que `6b < 6b+ < 6c`.
    pub fn rank(&self) -> i32 {
        i32::from(self.level) * 10 + i32::from(self.letter) * 2 + i32::from(self.plus)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// La misma cotation con el sufijo `+`
    pub fn with_plus(&self) -> Self {
        Self { plus: true, ..*self }
    }
}

impl Ord for Cotation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Cotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from(b'a' + self.letter);
        write!(f, "{}{}{}", self.level, letter, if self.plus { "+" } else { "" })
    }
}

impl FromStr for Cotation {
    type Err = MalformedGradeToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MalformedGradeToken(s.to_string()))
    }
}

/// Rango de un token, `None` si está mal formado
pub fn grade_rank(token: &str) -> Option<i32> {
    Cotation::parse(token).map(|c| c.rank())
}

/// Compara dos cotations opcionales.
///
/// Si falta alguna o no se puede parsear, el resultado es `Equal`
/// para no reordenar nada.
pub fn compare_grades(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(Cotation::parse), b.and_then(Cotation::parse)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}
