//! Noyau scientifique
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie (lexicale / syntaxe / calcul) + étape d’origine
//! - config.rs    : unité d’angle + précision (validées)
//! - nombre.rs    : valeur Réel | Complexe + règles des opérateurs
//! - lexique.rs   : table statique opérateurs / fonctions / constantes
//! - fonctions.rs : fonctions usuelles (log, exp, racines, factorielle…)
//! - trig.rs      : trigonométrie selon l’unité + angles remarquables
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard -> RPN
//! - calcul.rs    : évaluation de la RPN (pile)
//! - lecture.rs   : arrondi final + affichage décimal
//! - eval.rs      : pipeline complet

pub mod calcul;
pub mod config;
pub mod erreurs;
pub mod eval;
pub mod fonctions;
pub mod jetons;
pub mod lecture;
pub mod lexique;
pub mod nombre;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::{ConfigEval, UniteAngle, PRECISION_MAX, PRECISION_MIN};
pub use erreurs::{ErreurConfig, ErreurEval, ErreurLexicale, ErreurMoteur, ErreurSyntaxe, Etape};
pub use eval::{eval_detaille, eval_expression, Demarche};
pub use lecture::format_nombre;
pub use nombre::Nombre;
