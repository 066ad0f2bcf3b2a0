// src/noyau/lecture.rs
//
// Lecture décimale d’un résultat : arrondi à n chiffres significatifs + affichage.
// - L’arrondi travaille sur la valeur EXACTE du double (BigRational), en entier “scalé”
//   (×10^k), puis relit le décimal obtenu : pas d’erreur d’arrondi cumulée.
// - L’affichage ne montre jamais plus de chiffres que l’écriture la plus courte
//   qui identifie le double (1/3 à 20 chiffres -> 0.3333333333333333).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::nombre::Nombre;

/// Notation positionnelle tant que l’exposant décimal reste dans [-5, precision).
const EXPOSANT_MIN_POSITIONNEL: i32 = -5;

/* ------------------------ Décimal (scaled) ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

fn pow10_rat(k: i32) -> BigRational {
    if k >= 0 {
        BigRational::from_integer(pow10(k.unsigned_abs()))
    } else {
        BigRational::new(BigInt::one(), pow10(k.unsigned_abs()))
    }
}

/// |x| arrondi à `n` chiffres significatifs (moitié loin de zéro).
///
/// Retour: (chiffres, exposant) avec 10^(n-1) <= chiffres < 10^n
/// et |x| ≈ chiffres × 10^(exposant - n + 1).
/// None si x est nul ou non fini.
fn chiffres_arrondis(x: f64, n: usize) -> Option<(BigInt, i32)> {
    let n = n.max(1);
    let exact = BigRational::from_float(x.abs())?;
    if exact.is_zero() {
        return None;
    }

    let bas = pow10(n as u32 - 1);
    let haut = pow10(n as u32);

    // estimation flottante, corrigée ensuite sur la valeur exacte
    let mut e = x.abs().log10().floor() as i32;
    for _ in 0..4 {
        let scaled = (&exact * pow10_rat(n as i32 - 1 - e)).round().to_integer();
        if scaled >= haut {
            e += 1;
            continue;
        }
        if scaled < bas {
            e -= 1;
            continue;
        }
        return Some((scaled, e));
    }
    None
}

/// x arrondi à `chiffres` chiffres significatifs.
///
/// Au-delà de 17 chiffres, c’est l’identité (un double se relit exactement).
pub fn arrondir(x: f64, chiffres: usize) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    match chiffres_arrondis(x, chiffres) {
        Some((c, e)) => {
            let signe = if x < 0.0 { "-" } else { "" };
            let texte = format!("{signe}{c}e{}", e - (chiffres.max(1) as i32 - 1));
            // 1.797699e308 à 6 chiffres dépasserait f64::MAX : on garde x
            texte.parse().ok().filter(|v: &f64| v.is_finite()).unwrap_or(x)
        }
        None => x,
    }
}

/* ------------------------ Affichage ------------------------ */

/// Chiffres (sans zéros de fin) et exposant décimal du premier chiffre.
fn chiffres_affiches(x: f64, precision: usize) -> (String, i32) {
    // écriture la plus courte qui relit exactement x
    let court = format!("{:e}", x.abs());
    if let Some((mantisse, exposant)) = court.split_once('e') {
        let chiffres: String = mantisse.chars().filter(char::is_ascii_digit).collect();
        if chiffres.len() <= precision {
            if let Ok(e) = exposant.parse::<i32>() {
                return (chiffres.trim_end_matches('0').to_string(), e);
            }
        }
    }

    match chiffres_arrondis(x, precision) {
        Some((c, e)) => {
            let s = c.to_str_radix(10);
            (s.trim_end_matches('0').to_string(), e)
        }
        None => ("0".to_string(), 0),
    }
}

fn mise_en_forme(negatif: bool, chiffres: &str, e: i32, precision: usize) -> String {
    let chiffres = if chiffres.is_empty() { "0" } else { chiffres };
    let signe = if negatif { "-" } else { "" };

    if (EXPOSANT_MIN_POSITIONNEL..precision as i32).contains(&e) {
        if e < 0 {
            let zeros = "0".repeat((-e - 1) as usize);
            return format!("{signe}0.{zeros}{chiffres}");
        }
        let entiers = e as usize + 1;
        if chiffres.len() <= entiers {
            let zeros = "0".repeat(entiers - chiffres.len());
            return format!("{signe}{chiffres}{zeros}");
        }
        let (a, b) = chiffres.split_at(entiers);
        return format!("{signe}{a}.{b}");
    }

    let (tete, reste) = chiffres.split_at(1);
    if reste.is_empty() {
        format!("{signe}{tete}e{e}")
    } else {
        format!("{signe}{tete}.{reste}e{e}")
    }
}

/// Formate un réel à `precision` chiffres significatifs.
pub fn format_reel(x: f64, precision: usize) -> String {
    if x == 0.0 {
        return "0".to_string(); // y compris -0
    }
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    let precision = precision.max(1);
    let (chiffres, e) = chiffres_affiches(x, precision);
    mise_en_forme(x < 0.0, &chiffres, e, precision)
}

/// Formate un Nombre : réel tel quel, complexe en a+bi / a-bi (bi seul si a = 0).
pub fn format_nombre(n: &Nombre, precision: usize) -> String {
    match n {
        Nombre::Reel(x) => format_reel(*x, precision),
        Nombre::Complexe(z) => {
            let im = format_reel(z.im.abs(), precision);
            if z.re == 0.0 {
                let signe = if z.im < 0.0 { "-" } else { "" };
                return format!("{signe}{im}i");
            }
            let re = format_reel(z.re, precision);
            let signe = if z.im < 0.0 { '-' } else { '+' };
            format!("{re}{signe}{im}i")
        }
    }
}
