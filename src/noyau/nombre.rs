// src/noyau/nombre.rs
//
// Valeur du moteur : Réel | Complexe
// ----------------------------------
// Règles de promotion :
// - Réel ⊗ Réel -> Réel, sauf si le résultat n’existe pas sur ℝ (ex: (-8)^(1/3))
//   -> promu en Complexe.
// - Complexe ⊗ _ -> Complexe, toujours (pas de rétrogradation, même si im == 0).
//
// Toute opération vérifie son résultat : ±∞ -> Depassement, NaN -> HorsDomaine.
// Rien n’est converti en silence.

use std::fmt;

use num_complex::Complex64;
use num_traits::Zero;

use super::erreurs::ErreurEval;
use super::lecture::{arrondir, format_nombre};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nombre {
    Reel(f64),
    Complexe(Complex64),
}

/// Échec d’une règle de calcul, sans position (le calcul RPN la rattache).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Echec {
    DivisionParZero,
    ModuloParZero,
    HorsDomaine(&'static str),
    Depassement,
}

impl Echec {
    pub fn situer(self, pos: usize) -> ErreurEval {
        match self {
            Echec::DivisionParZero => ErreurEval::DivisionParZero { pos },
            Echec::ModuloParZero => ErreurEval::ModuloParZero { pos },
            Echec::HorsDomaine(detail) => ErreurEval::HorsDomaine {
                detail: detail.to_string(),
                pos,
            },
            Echec::Depassement => ErreurEval::Depassement { pos },
        }
    }
}

/// Résultat d’une règle du lexique.
pub type Issue = Result<Nombre, Echec>;

impl Nombre {
    /// Unité imaginaire (constantes `i` et `j`).
    pub const I: Nombre = Nombre::Complexe(Complex64::new(0.0, 1.0));

    pub fn est_complexe(&self) -> bool {
        matches!(self, Nombre::Complexe(_))
    }

    pub fn en_complexe(self) -> Complex64 {
        match self {
            Nombre::Reel(x) => Complex64::new(x, 0.0),
            Nombre::Complexe(z) => z,
        }
    }

    pub fn partie_reelle(&self) -> f64 {
        match self {
            Nombre::Reel(x) => *x,
            Nombre::Complexe(z) => z.re,
        }
    }

    pub fn partie_imaginaire(&self) -> f64 {
        match self {
            Nombre::Reel(_) => 0.0,
            Nombre::Complexe(z) => z.im,
        }
    }

    pub fn est_nul(&self) -> bool {
        match self {
            Nombre::Reel(x) => *x == 0.0,
            Nombre::Complexe(z) => z.is_zero(),
        }
    }

    /// Refuse les résultats non finis.
    pub fn verifie(self) -> Issue {
        let (a, b) = (self.partie_reelle(), self.partie_imaginaire());
        if a.is_nan() || b.is_nan() {
            return Err(Echec::HorsDomaine("résultat non défini"));
        }
        if a.is_infinite() || b.is_infinite() {
            return Err(Echec::Depassement);
        }
        Ok(self)
    }

    /* ------------------------ Opérateurs ------------------------ */

    pub fn plus(self, autre: Nombre) -> Issue {
        match (self, autre) {
            (Nombre::Reel(a), Nombre::Reel(b)) => Nombre::Reel(a + b).verifie(),
            (a, b) => Nombre::Complexe(a.en_complexe() + b.en_complexe()).verifie(),
        }
    }

    pub fn moins(self, autre: Nombre) -> Issue {
        match (self, autre) {
            (Nombre::Reel(a), Nombre::Reel(b)) => Nombre::Reel(a - b).verifie(),
            (a, b) => Nombre::Complexe(a.en_complexe() - b.en_complexe()).verifie(),
        }
    }

    pub fn fois(self, autre: Nombre) -> Issue {
        match (self, autre) {
            (Nombre::Reel(a), Nombre::Reel(b)) => Nombre::Reel(a * b).verifie(),
            (a, b) => Nombre::Complexe(a.en_complexe() * b.en_complexe()).verifie(),
        }
    }

    pub fn divise(self, autre: Nombre) -> Issue {
        if autre.est_nul() {
            return Err(Echec::DivisionParZero);
        }
        match (self, autre) {
            (Nombre::Reel(a), Nombre::Reel(b)) => Nombre::Reel(a / b).verifie(),
            (a, b) => Nombre::Complexe(a.en_complexe() / b.en_complexe()).verifie(),
        }
    }

    /// Modulo “plancher” : le reste prend le signe du diviseur (-7 % 3 = 2).
    pub fn modulo(self, autre: Nombre) -> Issue {
        let (a, b) = match (self, autre) {
            (Nombre::Reel(a), Nombre::Reel(b)) => (a, b),
            _ => return Err(Echec::HorsDomaine("modulo d’un complexe")),
        };
        if b == 0.0 {
            return Err(Echec::ModuloParZero);
        }
        let mut r = a % b;
        if r != 0.0 && (r < 0.0) != (b < 0.0) {
            r += b;
        }
        Nombre::Reel(r).verifie()
    }

    /// Puissance. Conventions :
    /// - x^0 = 1 (donc 0^0 = 1)
    /// - 0^(négatif) -> division par zéro
    /// - base réelle négative, exposant non entier -> valeur principale complexe
    pub fn puissance(self, exposant: Nombre) -> Issue {
        match (self, exposant) {
            (Nombre::Reel(b), Nombre::Reel(e)) => {
                if e == 0.0 {
                    return Ok(Nombre::Reel(1.0));
                }
                if b == 0.0 {
                    return if e < 0.0 {
                        Err(Echec::DivisionParZero)
                    } else {
                        Ok(Nombre::Reel(0.0))
                    };
                }
                if b < 0.0 && e.fract() != 0.0 {
                    return Nombre::Complexe(Complex64::new(b, 0.0).powf(e)).verifie();
                }
                Nombre::Reel(b.powf(e)).verifie()
            }
            (base, exposant) => {
                let z = base.en_complexe();
                let w = exposant.en_complexe();
                if w.is_zero() {
                    return Ok(Nombre::Complexe(Complex64::new(1.0, 0.0)));
                }
                if z.is_zero() {
                    return if w.re > 0.0 {
                        Ok(Nombre::Complexe(Complex64::zero()))
                    } else if w.im == 0.0 {
                        Err(Echec::DivisionParZero)
                    } else {
                        Err(Echec::HorsDomaine("zéro élevé à une puissance complexe"))
                    };
                }
                // exposant entier : produit exact (i^2 = -1 sans bruit)
                if let Nombre::Reel(e) = exposant {
                    if e.fract() == 0.0 && e.abs() <= f64::from(i32::MAX) {
                        return Nombre::Complexe(z.powi(e as i32)).verifie();
                    }
                }
                Nombre::Complexe(z.powc(w)).verifie()
            }
        }
    }

    pub fn oppose(self) -> Issue {
        match self {
            Nombre::Reel(x) => Ok(Nombre::Reel(-x)),
            Nombre::Complexe(z) => Ok(Nombre::Complexe(-z)),
        }
    }

    pub fn identite(self) -> Issue {
        Ok(self)
    }

    /* ------------------------ Sortie ------------------------ */

    /// Arrondi final à `chiffres` chiffres significatifs (chaque composante).
    pub fn arrondi(self, chiffres: usize) -> Nombre {
        match self {
            Nombre::Reel(x) => Nombre::Reel(arrondir(x, chiffres)),
            Nombre::Complexe(z) => {
                Nombre::Complexe(Complex64::new(arrondir(z.re, chiffres), arrondir(z.im, chiffres)))
            }
        }
    }

    /// Affichage à `precision` chiffres significatifs (a+bi pour un complexe).
    pub fn formater(&self, precision: usize) -> String {
        format_nombre(self, precision)
    }
}

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 17 chiffres : jamais plus que l’écriture la plus courte du double
        f.write_str(&format_nombre(self, 17))
    }
}
