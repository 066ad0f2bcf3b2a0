//! Calculatrice scientifique : moteur d’expressions (jetons -> RPN -> calcul).

pub mod noyau;

pub use noyau::{eval_expression, ConfigEval, ErreurMoteur, Nombre, UniteAngle};
