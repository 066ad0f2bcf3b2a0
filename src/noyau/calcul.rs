// src/noyau/calcul.rs
//
// Évaluation d’une RPN : une seule pile d’opérandes, un seul passage.
// - Num / Constante : empilés
// - Opérateur / Fonction : dépilent leur arité, appliquent la règle du lexique
// - Fin : exactement une valeur, arrondie à la précision configurée
//
// Pleine précision f64 entre les étapes ; l’arrondi n’a lieu qu’à la sortie.

use super::config::ConfigEval;
use super::erreurs::ErreurEval;
use super::lexique::Regle;
use super::nombre::Nombre;
use super::rpn::{ElementRpn, Rpn};

fn depiler(pile: &mut Vec<Nombre>, e: &ElementRpn) -> Result<Nombre, ErreurEval> {
    pile.pop().ok_or_else(|| ErreurEval::PileInsuffisante {
        symbole: e.rpn.to_string(),
        pos: e.pos,
    })
}

/// Évalue une RPN produite par `to_rpn`.
pub fn eval_rpn(rpn: &[ElementRpn], config: ConfigEval) -> Result<Nombre, ErreurEval> {
    let mut pile: Vec<Nombre> = Vec::with_capacity(rpn.len());

    for e in rpn {
        let valeur = match e.rpn {
            Rpn::Num(v) => {
                // littéral hors de portée du double (ex: 1e400)
                if !v.is_finite() {
                    return Err(ErreurEval::Depassement { pos: e.pos });
                }
                Nombre::Reel(v)
            }
            Rpn::Constante(c) => c.valeur,
            Rpn::Operateur(op) => match op.regle {
                Regle::Unaire(f) => {
                    let x = depiler(&mut pile, e)?;
                    f(x).map_err(|echec| echec.situer(e.pos))?
                }
                Regle::Binaire(f) => {
                    let b = depiler(&mut pile, e)?;
                    let a = depiler(&mut pile, e)?;
                    f(a, b).map_err(|echec| echec.situer(e.pos))?
                }
            },
            Rpn::Fonction(fonc) => {
                let x = depiler(&mut pile, e)?;
                (fonc.regle)(x, config.unite()).map_err(|echec| echec.situer(e.pos))?
            }
        };
        pile.push(valeur);
    }

    match (pile.pop(), pile.len()) {
        (Some(v), 0) => Ok(v.arrondi(config.precision())),
        (None, _) => Err(ErreurEval::PileIncoherente { restants: 0 }),
        (Some(_), reste) => Err(ErreurEval::PileIncoherente {
            restants: reste + 1,
        }),
    }
}
