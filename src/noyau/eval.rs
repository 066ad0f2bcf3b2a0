//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> calcul (pile) -> arrondi final
//!
//! Chaque appel est indépendant : seul le lexique (lecture seule) est partagé.
//! La première erreur rencontrée est rendue telle quelle, rangée sous son étape.

use tracing::{debug, debug_span};

use super::calcul::eval_rpn;
use super::config::ConfigEval;
use super::erreurs::ErreurMoteur;
use super::jetons::{format_tokens, tokenize};
use super::nombre::Nombre;
use super::rpn::{format_rpn, to_rpn};

/// Démarche : trace lisible des étapes (jetons, RPN) + valeur.
#[derive(Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub valeur: Nombre,
}

/// API publique : évalue une expression avec la configuration donnée.
pub fn eval_expression(expr_str: &str, config: ConfigEval) -> Result<Nombre, ErreurMoteur> {
    eval_detaille(expr_str, config).map(|d| d.valeur)
}

/// Comme `eval_expression`, avec les étapes intermédiaires.
pub fn eval_detaille(expr_str: &str, config: ConfigEval) -> Result<Demarche, ErreurMoteur> {
    let _span = debug_span!("eval", expr = expr_str).entered();

    let resultat = pipeline(expr_str, config);
    if let Err(e) = &resultat {
        debug!(etape = %e.etape(), position = ?e.position(), "échec: {e}");
    }
    resultat
}

fn pipeline(expr_str: &str, config: ConfigEval) -> Result<Demarche, ErreurMoteur> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    let jetons_txt = format_tokens(&jetons);
    debug!(n = jetons.len(), jetons = %jetons_txt, "jetons");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_rpn(&rpn);
    debug!(rpn = %rpn_txt, "RPN");

    // 3) Calcul
    let valeur = eval_rpn(&rpn, config)?;
    debug!(unite = ?config.unite(), precision = config.precision(), %valeur, "calcul");

    Ok(Demarche {
        jetons: jetons_txt,
        rpn: rpn_txt,
        valeur,
    })
}
