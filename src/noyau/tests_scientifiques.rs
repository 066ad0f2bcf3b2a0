//! Tests scientifiques (campagne) : propriétés du moteur + limites contrôlées.
//!
//! But : vérifier le contrat public (eval_expression) de bout en bout.
//! - précédence, associativité, unaires, multiplication implicite
//! - unité d’angle, promotion complexe, précision
//! - erreurs rangées par étape
//! - stress borné (budget temps global)

use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;

use super::erreurs::{ErreurEval, ErreurLexicale, ErreurMoteur, ErreurSyntaxe};
use super::{eval_expression, ConfigEval, Nombre, UniteAngle};

fn cfg(unite: UniteAngle, precision: u32) -> ConfigEval {
    ConfigEval::new(unite, precision).unwrap_or_else(|e| panic!("config: {e}"))
}

fn eval_ok(expr: &str, unite: UniteAngle) -> Nombre {
    eval_expression(expr, cfg(unite, 10)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn reel(expr: &str) -> f64 {
    match eval_ok(expr, UniteAngle::Radians) {
        Nombre::Reel(x) => x,
        autre => panic!("réel attendu: expr={expr:?} obtenu={autre:?}"),
    }
}

fn texte(expr: &str, precision: u32) -> String {
    eval_expression(expr, cfg(UniteAngle::Radians, precision))
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .formater(precision as usize)
}

fn erreur(expr: &str) -> ErreurMoteur {
    match eval_expression(expr, cfg(UniteAngle::Radians, 10)) {
        Err(e) => e,
        Ok(v) => panic!("erreur attendue: expr={expr:?} obtenu={v}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_eq!(reel("2 + 3 * 4"), 14.0);
    assert_eq!(reel("(2 + 3) * 4"), 20.0);
    assert_eq!(reel("8 - 3 - 2"), 3.0);
    assert_eq!(reel("64 / 4 / 2"), 8.0);
    assert_eq!(reel("2 + 10 % 4 * 3"), 8.0);
}

#[test]
fn sci_puissance_associative_a_droite() {
    assert_eq!(reel("2^3^2"), 512.0);
    assert_eq!(reel("(2^3)^2"), 64.0);
    assert_eq!(reel("2^-1"), 0.5);
    assert_eq!(reel("0^0"), 1.0);
}

#[test]
fn sci_unaires() {
    // unaire au-dessus de tout binaire, '^' compris
    assert_eq!(reel("-2^2"), 4.0);
    assert_eq!(reel("-(2^2)"), -4.0);
    assert_eq!(reel("2*-3"), -6.0);
    assert_eq!(reel("--5"), 5.0);
    assert_eq!(reel("2++3"), 5.0);
    assert_eq!(reel("+7"), 7.0);
    assert_eq!(reel("3 - -3"), 6.0);
}

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(texte("2pi", 10), "6.283185307");
    assert_eq!(reel("2pi"), reel("2*pi"));
    assert_eq!(reel("2(3+1)"), 8.0);
    assert_eq!(reel("(1+1)(2+2)"), 8.0);
    assert_eq!(reel("3sqrt(4)"), 6.0);
}

/* ------------------------ Unité d’angle ------------------------ */

#[test]
fn sci_mode_angulaire() {
    assert_eq!(eval_ok("sin(30)", UniteAngle::Degres), Nombre::Reel(0.5));
    assert_eq!(eval_ok("sin(pi/2)", UniteAngle::Radians), Nombre::Reel(1.0));
    assert_eq!(eval_ok("sin(100)", UniteAngle::Grades), Nombre::Reel(1.0));
    assert_eq!(eval_ok("cos(60)", UniteAngle::Degres), Nombre::Reel(0.5));
    assert_eq!(eval_ok("asin(1)", UniteAngle::Degres), Nombre::Reel(90.0));
    assert_eq!(eval_ok("atan(1)", UniteAngle::Grades), Nombre::Reel(50.0));

    // même texte, unités différentes
    assert_ne!(
        eval_ok("sin(30)", UniteAngle::Degres),
        eval_ok("sin(30)", UniteAngle::Radians)
    );
}

#[test]
fn sci_unite_ignoree_hors_trigo() {
    for expr in ["exp(1)", "ln(10)", "sinh(1)", "sqrt(2)"] {
        assert_eq!(
            eval_ok(expr, UniteAngle::Degres),
            eval_ok(expr, UniteAngle::Radians),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_tangente_indefinie() {
    let e = eval_expression("tan(90)", cfg(UniteAngle::Degres, 10)).unwrap_err();
    assert!(matches!(
        e,
        ErreurMoteur::Evaluation(ErreurEval::HorsDomaine { pos: 0, .. })
    ));
}

/* ------------------------ Complexes ------------------------ */

#[test]
fn sci_promotion_complexe() {
    let z = eval_ok("sqrt(-1)", UniteAngle::Radians);
    assert!(z.est_complexe());
    assert_eq!(z.partie_reelle(), 0.0);
    assert_eq!(z.partie_imaginaire(), 1.0);

    let z = eval_ok("(-8)^(1/3)", UniteAngle::Radians);
    assert!(z.est_complexe());
    assert_abs_diff_eq!(z.partie_reelle(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(z.partie_imaginaire(), 3f64.sqrt(), epsilon = 1e-9);

    let z = eval_ok("ln(-1)", UniteAngle::Radians);
    assert!(z.est_complexe());
    assert_abs_diff_eq!(z.partie_imaginaire(), std::f64::consts::PI, epsilon = 1e-9);
}

#[test]
fn sci_complexe_reste_complexe() {
    // i^2 = -1, sans rétrogradation
    let z = eval_ok("i*i", UniteAngle::Radians);
    assert!(z.est_complexe());
    assert_eq!(z.partie_reelle(), -1.0);
    assert_eq!(z.formater(10), "-1+0i");

    assert_eq!(texte("(1+2i)*(1-2i)", 10), "5+0i");
    assert_eq!(texte("j - i", 10), "0i");
    assert_eq!(texte("3 + 4i", 10), "3+4i");
}

/* ------------------------ Précision ------------------------ */

#[test]
fn sci_precision_affichage() {
    assert_eq!(texte("1/3", 6), "0.333333");
    assert_eq!(texte("1/3", 20), "0.3333333333333333");
    assert_eq!(texte("2/3", 6), "0.666667");
    assert_eq!(
        eval_expression("1/3", cfg(UniteAngle::Radians, 6)),
        Ok(Nombre::Reel(0.333333))
    );
}

#[test]
fn sci_precision_sans_effet_sur_le_calcul() {
    for p in 6..=20 {
        assert_eq!(
            eval_expression("1/3 * 3", cfg(UniteAngle::Radians, p)),
            Ok(Nombre::Reel(1.0)),
            "precision={p}"
        );
    }
}

#[test]
fn sci_format_scientifique() {
    assert_eq!(texte("10^100", 10), "1e100");
    assert_eq!(texte("2.5e-7", 10), "2.5e-7");
    assert_eq!(texte("123456789", 6), "1.23457e8");
    assert_eq!(texte("-0.25", 10), "-0.25");
}

#[test]
fn sci_idempotence() {
    let c = cfg(UniteAngle::Degres, 12);
    for expr in ["sin(37) * ln(5)", "sqrt(-2) + gamma(4.5)", "2^0.5 % 1", "atan(3)"] {
        let a = eval_expression(expr, c).unwrap_or_else(|e| panic!("{e}"));
        let b = eval_expression(expr, c).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(a.partie_reelle().to_bits(), b.partie_reelle().to_bits());
        assert_eq!(a.partie_imaginaire().to_bits(), b.partie_imaginaire().to_bits());
    }
}

/* ------------------------ Fonctions + constantes ------------------------ */

#[test]
fn sci_fonctions_usuelles() {
    assert_eq!(reel("fact(5)"), 120.0);
    assert_eq!(reel("factorial(0)"), 1.0);
    assert_eq!(reel("gamma(5)"), 24.0);
    assert_eq!(reel("log(1000)"), 3.0);
    assert_eq!(reel("log2(8)"), 3.0);
    assert_eq!(reel("ln(e)"), 1.0);
    assert_eq!(reel("exp(0)"), 1.0);
    assert_eq!(reel("exp2(10)"), 1024.0);
    assert_eq!(reel("exp10(2)"), 100.0);
    assert_eq!(reel("cbrt(-27)"), -3.0);
    assert_eq!(reel("abs(-4)"), 4.0);
    assert_eq!(reel("sign(-3)"), -1.0);
    assert_eq!(reel("floor(-2.5)"), -3.0);
    assert_eq!(reel("ceil(2.1)"), 3.0);
    assert_eq!(reel("round(2.5)"), 3.0);
    assert_eq!(reel("trunc(-2.7)"), -2.0);
}

#[test]
fn sci_constantes_et_casse() {
    assert_eq!(reel("tau/2 - pi"), 0.0);
    assert_eq!(texte("phi", 10), "1.618033989");
    assert_eq!(reel("PI"), reel("pi"));
    assert_eq!(reel("SQRT(16)"), 4.0);
}

#[test]
fn sci_saisie_unicode() {
    assert_eq!(reel("π"), reel("pi"));
    assert_eq!(reel("√4"), 2.0);
    assert_eq!(reel("6÷3×2"), 4.0);
    assert_eq!(reel(".5 + .5"), 1.0);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_par_etape() {
    assert_eq!(
        erreur("2 + (3 * 4"),
        ErreurMoteur::Syntaxe(ErreurSyntaxe::ParentheseNonFermee { pos: 4 })
    );
    assert_eq!(
        erreur("5 / 0"),
        ErreurMoteur::Evaluation(ErreurEval::DivisionParZero { pos: 2 })
    );
    assert_eq!(
        erreur("2 $ 3"),
        ErreurMoteur::Lexicale(ErreurLexicale::CaractereInattendu { car: '$', pos: 2 })
    );
    assert_eq!(
        erreur("5 % 0"),
        ErreurMoteur::Evaluation(ErreurEval::ModuloParZero { pos: 2 })
    );
    assert_eq!(erreur(""), ErreurMoteur::Syntaxe(ErreurSyntaxe::ExpressionVide));
    assert!(matches!(
        erreur("1.2.3"),
        ErreurMoteur::Lexicale(ErreurLexicale::NombreMalForme { .. })
    ));
    assert!(matches!(
        erreur("foo(2)"),
        ErreurMoteur::Syntaxe(ErreurSyntaxe::IdentifiantInconnu { .. })
    ));
}

#[test]
fn sci_erreurs_de_domaine() {
    for expr in ["fact(-1)", "fact(2.5)", "gamma(-2)", "ln(0)", "5 % i", "atan(i)"] {
        assert!(
            matches!(
                erreur(expr),
                ErreurMoteur::Evaluation(ErreurEval::HorsDomaine { .. })
            ),
            "expr={expr:?}"
        );
    }
    assert!(matches!(
        erreur("fact(171)"),
        ErreurMoteur::Evaluation(ErreurEval::Depassement { .. })
    ));
    assert!(matches!(
        erreur("0^-1"),
        ErreurMoteur::Evaluation(ErreurEval::DivisionParZero { .. })
    ));
}

/* ------------------------ Stress (borné) ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let n = 2000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    budget(t0, max);
    assert_eq!(reel(&expr), 1.0);

    let expr = format!("{}4{}", "sqrt(".repeat(200), ")".repeat(200));
    assert_abs_diff_eq!(reel(&expr), 1.0, epsilon = 1e-9);
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1/2"; 5000].join(" + ");
    assert_eq!(reel(&expr), 2500.0);
    budget(t0, max);
}

#[test]
fn sci_exposant_inacheve_toujours_lexical() {
    for expr in ["1e+", "1e+ 2", "1e- 5", "(1e+)"] {
        assert!(
            matches!(
                erreur(expr),
                ErreurMoteur::Lexicale(ErreurLexicale::NombreInacheve { .. })
            ),
            "expr={expr:?}"
        );
    }
    // 'e' seul reste la constante
    assert_eq!(reel("2e - 2e"), 0.0);
}

/* ------------------------ Concurrence ------------------------ */

#[test]
fn sci_appels_concurrents_identiques() {
    let expr = "2pi + sin(30) * gamma(4.5) - sqrt(-2)";
    let c = cfg(UniteAngle::Degres, 12);
    let reference = eval_expression(expr, c).unwrap_or_else(|e| panic!("{e}"));

    let fils: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || eval_expression(expr, c)))
        .collect();

    for f in fils {
        let v = f
            .join()
            .unwrap_or_else(|_| panic!("thread en panique"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(v.partie_reelle().to_bits(), reference.partie_reelle().to_bits());
        assert_eq!(
            v.partie_imaginaire().to_bits(),
            reference.partie_imaginaire().to_bits()
        );
        assert_eq!(v.est_complexe(), reference.est_complexe());
    }
}
