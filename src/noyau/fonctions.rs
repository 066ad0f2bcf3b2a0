// src/noyau/fonctions.rs
//
// Règles des fonctions non trigonométriques (hyperboliques, log/exp, racines,
// factorielle/gamma, arrondis). Toutes ignorent l’unité d’angle.
//
// Convention de promotion (voir nombre.rs) : un réel hors domaine réel passe en
// complexe quand la valeur complexe existe (ln(-1) = iπ, sqrt(-4) = 2i) ;
// sinon -> Echec::HorsDomaine.

use std::f64::consts::{LN_10, LN_2, PI, TAU};

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{One, ToPrimitive, Zero};

use super::config::UniteAngle;
use super::nombre::{Echec, Issue, Nombre};

/// 171! dépasse f64::MAX.
const FACTORIELLE_MAX: f64 = 170.0;

/// Applique `fr` à un réel, `fc` à un complexe.
fn par_nature(x: Nombre, fr: fn(f64) -> f64, fc: fn(Complex64) -> Complex64) -> Issue {
    match x {
        Nombre::Reel(v) => Nombre::Reel(fr(v)).verifie(),
        Nombre::Complexe(z) => Nombre::Complexe(fc(z)).verifie(),
    }
}

/* ------------------------ Hyperboliques ------------------------ */

pub fn sinh(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, f64::sinh, |z| z.sinh())
}

pub fn cosh(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, f64::cosh, |z| z.cosh())
}

pub fn tanh(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, f64::tanh, |z| z.tanh())
}

/* ------------------------ Logarithmes ------------------------ */

/// ln, avec promotion des réels négatifs ; ln(0) refusé.
fn ln_promu(x: Nombre) -> Result<Nombre, Echec> {
    match x {
        Nombre::Reel(v) if v > 0.0 => Ok(Nombre::Reel(v.ln())),
        Nombre::Reel(v) if v < 0.0 => Ok(Nombre::Complexe(Complex64::new(v, 0.0).ln())),
        Nombre::Complexe(z) if !z.is_zero() => Ok(Nombre::Complexe(z.ln())),
        _ => Err(Echec::HorsDomaine("logarithme de zéro")),
    }
}

pub fn ln(x: Nombre, _: UniteAngle) -> Issue {
    ln_promu(x)?.verifie()
}

pub fn log10(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        // log10 direct : log(1000) = 3 exactement
        Nombre::Reel(v) if v > 0.0 => Nombre::Reel(v.log10()).verifie(),
        _ => match ln_promu(x)? {
            Nombre::Complexe(z) => Nombre::Complexe(z / LN_10).verifie(),
            Nombre::Reel(v) => Nombre::Reel(v / LN_10).verifie(),
        },
    }
}

pub fn log2(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) if v > 0.0 => Nombre::Reel(v.log2()).verifie(),
        _ => match ln_promu(x)? {
            Nombre::Complexe(z) => Nombre::Complexe(z / LN_2).verifie(),
            Nombre::Reel(v) => Nombre::Reel(v / LN_2).verifie(),
        },
    }
}

/* ------------------------ Exponentielles ------------------------ */

pub fn exp(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, f64::exp, |z| z.exp())
}

pub fn exp2(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, f64::exp2, |z| (z * LN_2).exp())
}

pub fn exp10(x: Nombre, _: UniteAngle) -> Issue {
    par_nature(x, |v| 10f64.powf(v), |z| (z * LN_10).exp())
}

/* ------------------------ Racines ------------------------ */

pub fn sqrt(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) if v >= 0.0 => Nombre::Reel(v.sqrt()).verifie(),
        // √(-v) = i·√v exactement
        Nombre::Reel(v) => Nombre::Complexe(Complex64::new(0.0, (-v).sqrt())).verifie(),
        Nombre::Complexe(z) => Nombre::Complexe(z.sqrt()).verifie(),
    }
}

/// Racine cubique réelle (cbrt(-8) = -2) ; valeur principale pour un complexe.
pub fn cbrt(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => Nombre::Reel(v.cbrt()).verifie(),
        Nombre::Complexe(z) if z.is_zero() => Ok(Nombre::Complexe(z)),
        Nombre::Complexe(z) => Nombre::Complexe(z.powf(1.0 / 3.0)).verifie(),
    }
}

/* ------------------------ Factorielle / Gamma ------------------------ */

/// n! exact (big int) puis converti en double.
fn factorielle_exacte(n: u64) -> f64 {
    let produit = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
    produit.to_f64().unwrap_or(f64::INFINITY)
}

pub fn factorielle(x: Nombre, _: UniteAngle) -> Issue {
    let v = match x {
        Nombre::Reel(v) => v,
        Nombre::Complexe(_) => return Err(Echec::HorsDomaine("factorielle d’un complexe")),
    };
    if v.fract() != 0.0 {
        return Err(Echec::HorsDomaine("factorielle d’un non-entier"));
    }
    if v < 0.0 {
        return Err(Echec::HorsDomaine("factorielle d’un entier négatif"));
    }
    if v > FACTORIELLE_MAX {
        return Err(Echec::Depassement);
    }
    Nombre::Reel(factorielle_exacte(v as u64)).verifie()
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Γ(x) = f64::MAX pour x ≈ 171.62 ; au-delà, dépassement.
const GAMMA_ARG_MAX: f64 = 171.624_376_956_302_7;

/// Au-delà, 1/Γ(x) est sous le plus petit sous-normal.
const GAMMA_INVERSE_NULLE: f64 = 180.0;

/// Termes de Lanczos pour x >= 1/2 : Γ(x) = √(2π) · p · e^(-t) · p · a,
/// avec p = t^((x - 1/2) / 2). La puissance est coupée en deux pour ne pas
/// dépasser avant la multiplication par e^(-t).
fn lanczos_termes(x: f64) -> (f64, f64, f64) {
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let a = LANCZOS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + i as f64));
    (t.powf((x + 0.5) / 2.0), t, a)
}

/// 1/Γ(x) pour x >= 1/2, sans passer par Γ(x) (qui peut dépasser).
fn gamma_inverse(x: f64) -> f64 {
    if x > GAMMA_INVERSE_NULLE {
        return 0.0;
    }
    let (p, t, a) = lanczos_termes(x);
    1.0 / (TAU.sqrt() * a) / p * t.exp() / p
}

/// Γ(x) par Lanczos (g = 7), réflexion pour x < 1/2.
fn gamma_lanczos(x: f64) -> f64 {
    if x < 0.5 {
        return PI / (PI * x).sin() * gamma_inverse(1.0 - x);
    }
    if x > GAMMA_ARG_MAX {
        return f64::INFINITY;
    }
    let (p, t, a) = lanczos_termes(x);
    TAU.sqrt() * p * (-t).exp() * p * a
}

pub fn gamma(x: Nombre, _: UniteAngle) -> Issue {
    let v = match x {
        Nombre::Reel(v) => v,
        Nombre::Complexe(_) => return Err(Echec::HorsDomaine("gamma d’un complexe")),
    };
    if v.fract() == 0.0 {
        if v <= 0.0 {
            return Err(Echec::HorsDomaine("pôle de gamma (entier négatif ou nul)"));
        }
        // Γ(n) = (n-1)! exact tant que ça tient dans un double
        if v <= FACTORIELLE_MAX + 1.0 {
            return Nombre::Reel(factorielle_exacte(v as u64 - 1)).verifie();
        }
    }
    Nombre::Reel(gamma_lanczos(v)).verifie()
}

/* ------------------------ Valeur absolue / signe ------------------------ */

/// |z| reste typé complexe (pas de rétrogradation).
pub fn abs(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) => Ok(Nombre::Reel(v.abs())),
        Nombre::Complexe(z) => Nombre::Complexe(Complex64::new(z.norm(), 0.0)).verifie(),
    }
}

/// sign(0) = 0 ; pour un complexe : z/|z|.
pub fn sign(x: Nombre, _: UniteAngle) -> Issue {
    match x {
        Nombre::Reel(v) if v > 0.0 => Ok(Nombre::Reel(1.0)),
        Nombre::Reel(v) if v < 0.0 => Ok(Nombre::Reel(-1.0)),
        Nombre::Reel(_) => Ok(Nombre::Reel(0.0)),
        Nombre::Complexe(z) if z.is_zero() => Ok(Nombre::Complexe(z)),
        Nombre::Complexe(z) => Nombre::Complexe(z.unscale(z.norm())).verifie(),
    }
}

/* ------------------------ Arrondis (par composante) ------------------------ */

fn composantes(x: Nombre, f: fn(f64) -> f64) -> Issue {
    match x {
        Nombre::Reel(v) => Ok(Nombre::Reel(f(v))),
        Nombre::Complexe(z) => Ok(Nombre::Complexe(Complex64::new(f(z.re), f(z.im)))),
    }
}

pub fn floor(x: Nombre, _: UniteAngle) -> Issue {
    composantes(x, f64::floor)
}

pub fn ceil(x: Nombre, _: UniteAngle) -> Issue {
    composantes(x, f64::ceil)
}

/// Demi loin de zéro : round(2.5) = 3.
pub fn round(x: Nombre, _: UniteAngle) -> Issue {
    composantes(x, f64::round)
}

pub fn trunc(x: Nombre, _: UniteAngle) -> Issue {
    composantes(x, f64::trunc)
}
