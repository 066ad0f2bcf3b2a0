// src/noyau/config.rs
//
// Configuration d’une évaluation (unité d’angle + précision).
// - Passée par valeur à chaque appel : aucun défaut global lu en douce.
// - Précision bornée [6, 20] : une ConfigEval invalide ne peut pas exister.

use serde::Deserialize;

use super::erreurs::ErreurConfig;

/// Précision minimale (chiffres significatifs).
pub const PRECISION_MIN: u8 = 6;

/// Précision maximale (chiffres significatifs).
pub const PRECISION_MAX: u8 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UniteAngle {
    #[serde(alias = "deg", alias = "degrees")]
    #[value(alias = "deg")]
    Degres,
    #[serde(alias = "rad")]
    #[value(alias = "rad")]
    Radians,
    #[serde(alias = "grad", alias = "gradians")]
    #[value(alias = "grad")]
    Grades,
}

impl UniteAngle {
    /// Un tour complet exprimé dans cette unité.
    pub fn tour(self) -> f64 {
        match self {
            UniteAngle::Degres => 360.0,
            UniteAngle::Radians => std::f64::consts::TAU,
            UniteAngle::Grades => 400.0,
        }
    }

    /// Angle (dans cette unité) -> radians.
    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            UniteAngle::Radians => x,
            UniteAngle::Degres => x.to_radians(),
            UniteAngle::Grades => x * (std::f64::consts::PI / 200.0),
        }
    }

    /// Radians -> angle dans cette unité.
    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            UniteAngle::Radians => x,
            UniteAngle::Degres => x.to_degrees(),
            UniteAngle::Grades => x * (200.0 / std::f64::consts::PI),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ConfigBrute")]
pub struct ConfigEval {
    unite: UniteAngle,
    precision: u8,
}

impl ConfigEval {
    pub fn new(unite: UniteAngle, precision: u32) -> Result<Self, ErreurConfig> {
        if !(u32::from(PRECISION_MIN)..=u32::from(PRECISION_MAX)).contains(&precision) {
            return Err(ErreurConfig::PrecisionHorsBornes {
                precision,
                min: PRECISION_MIN,
                max: PRECISION_MAX,
            });
        }
        Ok(Self {
            unite,
            precision: precision as u8,
        })
    }

    pub fn unite(&self) -> UniteAngle {
        self.unite
    }

    /// Nombre de chiffres significatifs du résultat final.
    pub fn precision(&self) -> usize {
        usize::from(self.precision)
    }
}

/// Forme lue telle quelle (fichier TOML), validée ensuite par `ConfigEval::new`.
#[derive(Deserialize)]
struct ConfigBrute {
    unite_angle: UniteAngle,
    precision: u32,
}

impl TryFrom<ConfigBrute> for ConfigEval {
    type Error = ErreurConfig;

    fn try_from(brute: ConfigBrute) -> Result<Self, Self::Error> {
        ConfigEval::new(brute.unite_angle, brute.precision)
    }
}
