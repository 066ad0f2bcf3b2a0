//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs de calcul attendues (division par zéro, domaine, dépassement)
//! - invariant clé : une entrée bien formée n’échoue JAMAIS en jetons/RPN
//!   ni sur une erreur interne (pile)

use std::time::{Duration, Instant};

use super::{eval_expression, ConfigEval, ErreurMoteur, Nombre, UniteAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Empreinte binaire d’un résultat (comparaison bit à bit, NaN compris).
fn empreinte(r: &Result<Nombre, ErreurMoteur>) -> Result<(u64, u64, bool), ErreurMoteur> {
    r.clone().map(|n| {
        (
            n.partie_reelle().to_bits(),
            n.partie_imaginaire().to_bits(),
            n.est_complexe(),
        )
    })
}

fn verifie_bien_forme(expr: &str, r: &Result<Nombre, ErreurMoteur>) -> bool {
    match r {
        Ok(n) => {
            assert!(
                n.partie_reelle().is_finite() && n.partie_imaginaire().is_finite(),
                "résultat non fini: expr={expr:?} valeur={n:?}"
            );
            true
        }
        Err(ErreurMoteur::Evaluation(e)) => {
            assert!(!e.est_interne(), "erreur interne: expr={expr:?} err={e}");
            false
        }
        Err(e) => panic!("entrée bien formée refusée: expr={expr:?} err={e}"),
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(10)),
        3 => format!(".{}", rng.pick(100)),
        4 => format!("{}e{}", 1 + rng.pick(9), rng.pick(5)),
        _ => format!("{}", 10 + rng.pick(990)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0..=3 => gen_nombre(rng),
        4 => "pi".to_string(),
        5 => "e".to_string(),
        6 => "i".to_string(),
        _ => format!("{}pi", 1 + rng.pick(4)), // multiplication implicite
    }
}

const FONCTIONS: [&str; 14] = [
    "sin", "cos", "tan", "asin", "atan", "sqrt", "abs", "ln", "log", "exp", "floor", "round",
    "cbrt", "tanh",
];

const BINAIRES: [char; 6] = ['+', '-', '*', '/', '^', '%'];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = BINAIRES[rng.pick(BINAIRES.len() as u32) as usize];
            format!(
                "({}{op}{})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        3 => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        4 => {
            let signe = if rng.coin() { '-' } else { '+' };
            format!("{signe}{}", gen_expr(rng, depth - 1))
        }
        // sans parenthèses externes : teste la précédence
        _ => format!(
            "{} * {} - {}",
            gen_atom(rng),
            gen_expr(rng, depth - 1),
            gen_atom(rng)
        ),
    }
}

/// Bruit : caractères du langage (et quelques intrus) tirés au hasard.
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[&str] = &[
        "1", "2", ".", "e", "+", "-", "*", "/", "^", "%", "(", ")", ",", " ", "pi", "sin", "x",
        "i", "$", "1e+",
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn configs() -> [ConfigEval; 3] {
    [
        ConfigEval::new(UniteAngle::Radians, 10).unwrap(),
        ConfigEval::new(UniteAngle::Degres, 6).unwrap(),
        ConfigEval::new(UniteAngle::Grades, 20).unwrap(),
    ]
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_forme_jamais_refuse() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let config = configs()[k % 3];

        if verifie_bien_forme(&expr, &eval_expression(&expr, config)) {
            seen_ok += 1;
        } else {
            seen_err += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties, bit à bit
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = a.clone();

    for _ in 0..150 {
        budget(t0, max);

        let ea = gen_expr(&mut a, 4);
        let eb = gen_expr(&mut b, 4);
        assert_eq!(ea, eb);

        for config in configs() {
            let r1 = eval_expression(&ea, config);
            let r2 = eval_expression(&eb, config);
            assert_eq!(empreinte(&r1), empreinte(&r2), "expr={ea:?}");
        }
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);
    let config = configs()[0];

    let mut seen_ok = 0usize;
    for _ in 0..1000 {
        budget(t0, max);

        let longueur = 1 + rng.pick(12) as usize;
        let expr = gen_bruit(&mut rng, longueur);

        // tout est permis sauf une erreur interne (ou une panique)
        match eval_expression(&expr, config) {
            Ok(_) => seen_ok += 1,
            Err(ErreurMoteur::Evaluation(e)) => {
                assert!(!e.est_interne(), "erreur interne: expr={expr:?} err={e}");
            }
            Err(_) => {}
        }
    }
    assert!(seen_ok > 0, "aucun bruit accepté: générateur trop agressif");
}
