// src/noyau/trig.rs
//
// Trigonométrie selon l’unité d’angle active
// ------------------------------------------
// - Entrées de sin/cos/tan converties en radians AVANT le calcul,
//   sorties de asin/acos/atan converties APRÈS.
// - Angles remarquables (multiples exacts de 15°) : valeurs exactes 0, ±1/2, ±1,
//   tan indéfinie aux multiples impairs de 90° (-> HorsDomaine).
// - Complexe : même conversion d’unité, calcul complexe.

use num_complex::Complex64;

use super::config::UniteAngle;
use super::nombre::{Echec, Issue, Nombre};

/// Nombre de pas de 15° dans un tour.
const PAS_PAR_TOUR: f64 = 24.0;

/// Au-delà, l’argument est trop grand pour qu’un multiple de 15° ait un sens.
const TOLERANCE_MAX: f64 = 1e-9;

/// Index k ∈ [0, 24) si l’angle vaut k × 15° (modulo un tour), à quelques ulps près.
fn angle_remarquable(x: f64, unite: UniteAngle) -> Option<usize> {
    if x == 0.0 {
        return Some(0);
    }
    // degrés / grades : réduction exacte (fmod) ; radians : tour non représentable
    let r = match unite {
        UniteAngle::Radians => x,
        _ => x.rem_euclid(unite.tour()),
    };
    let q = r / (unite.tour() / PAS_PAR_TOUR);
    let tolerance = 4.0 * f64::EPSILON * q.abs();
    if tolerance > TOLERANCE_MAX {
        return None;
    }
    let k = q.round();
    // k == 0 avec x != 0 : petit angle, le calcul direct est plus juste
    if k == 0.0 || (q - k).abs() > tolerance {
        return None;
    }
    Some(k.rem_euclid(PAS_PAR_TOUR) as usize)
}

fn sin_remarquable(k: usize) -> Option<f64> {
    match k {
        0 | 12 => Some(0.0),
        2 | 10 => Some(0.5),
        6 => Some(1.0),
        14 | 22 => Some(-0.5),
        18 => Some(-1.0),
        _ => None,
    }
}

fn cos_remarquable(k: usize) -> Option<f64> {
    sin_remarquable((k + 6) % 24)
}

enum TanRemarquable {
    Valeur(f64),
    Indefinie,
}

fn tan_remarquable(k: usize) -> Option<TanRemarquable> {
    match k % 12 {
        0 => Some(TanRemarquable::Valeur(0.0)),
        3 => Some(TanRemarquable::Valeur(1.0)),
        9 => Some(TanRemarquable::Valeur(-1.0)),
        6 => Some(TanRemarquable::Indefinie),
        _ => None,
    }
}

/// Angle réel -> radians (réduit d’abord d’un tour hors radians).
fn en_radians(x: f64, unite: UniteAngle) -> f64 {
    match unite {
        UniteAngle::Radians => x,
        _ => unite.vers_radians(x.rem_euclid(unite.tour())),
    }
}

fn en_radians_c(z: Complex64, unite: UniteAngle) -> Complex64 {
    z * unite.vers_radians(1.0)
}

fn depuis_radians_c(z: Complex64, unite: UniteAngle) -> Complex64 {
    z * unite.depuis_radians(1.0)
}

/// Hors radians, un résultat à quelques ulps d’un entier devient cet entier
/// (asin(0.5) = 30° et non 30.000000000000004).
fn recale(y: f64, unite: UniteAngle) -> f64 {
    if unite == UniteAngle::Radians {
        return y;
    }
    let k = y.round();
    if (y - k).abs() <= 4.0 * f64::EPSILON * y.abs() {
        k
    } else {
        y
    }
}

/* ------------------------ Directes ------------------------ */

pub fn sin(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => {
            if let Some(s) = angle_remarquable(v, unite).and_then(sin_remarquable) {
                return Ok(Nombre::Reel(s));
            }
            Nombre::Reel(en_radians(v, unite).sin()).verifie()
        }
        Nombre::Complexe(z) => Nombre::Complexe(en_radians_c(z, unite).sin()).verifie(),
    }
}

pub fn cos(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => {
            if let Some(c) = angle_remarquable(v, unite).and_then(cos_remarquable) {
                return Ok(Nombre::Reel(c));
            }
            Nombre::Reel(en_radians(v, unite).cos()).verifie()
        }
        Nombre::Complexe(z) => Nombre::Complexe(en_radians_c(z, unite).cos()).verifie(),
    }
}

pub fn tan(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => {
            match angle_remarquable(v, unite).and_then(tan_remarquable) {
                Some(TanRemarquable::Valeur(t)) => return Ok(Nombre::Reel(t)),
                Some(TanRemarquable::Indefinie) => {
                    return Err(Echec::HorsDomaine("tangente indéfinie"))
                }
                None => {}
            }
            Nombre::Reel(en_radians(v, unite).tan()).verifie()
        }
        Nombre::Complexe(z) => Nombre::Complexe(en_radians_c(z, unite).tan()).verifie(),
    }
}

/* ------------------------ Réciproques ------------------------ */

pub fn asin(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) if (-1.0..=1.0).contains(&v) => {
            Nombre::Reel(recale(unite.depuis_radians(v.asin()), unite)).verifie()
        }
        autre => Nombre::Complexe(depuis_radians_c(autre.en_complexe().asin(), unite)).verifie(),
    }
}

pub fn acos(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) if (-1.0..=1.0).contains(&v) => {
            Nombre::Reel(recale(unite.depuis_radians(v.acos()), unite)).verifie()
        }
        autre => Nombre::Complexe(depuis_radians_c(autre.en_complexe().acos(), unite)).verifie(),
    }
}

pub fn atan(x: Nombre, unite: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => Nombre::Reel(recale(unite.depuis_radians(v.atan()), unite)).verifie(),
        Nombre::Complexe(z) => {
            if z.re == 0.0 && z.im.abs() == 1.0 {
                return Err(Echec::HorsDomaine("atan(±i) non défini"));
            }
            Nombre::Complexe(depuis_radians_c(z.atan(), unite)).verifie()
        }
    }
}
