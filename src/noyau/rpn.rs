// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix), déjà résolue contre le lexique
//   (opérateur / fonction / constante), positions conservées.
//
// Règles:
// - Ident(name):
//    - fonction => empilée, liée par la ')' qui ferme son argument
//    - constante => sortie directe
//    - sinon => IdentifiantInconnu
// - '+' / '-' unaires : quand on ATTEND un opérande (début, après un opérateur,
//   '(' ou ','). Empilés sans rien dépiler (préfixe, précédence 4, droite).
// - Multiplication implicite : valeur suivie de Num / Ident / '(' => '*' inséré.
//
// NOTE:
// - La sortie ne contient jamais de parenthèse : calcul.rs n’a qu’une pile.

use std::fmt;

use super::erreurs::ErreurSyntaxe;
use super::jetons::{Jeton, Tok};
use super::lexique::{lexique, Associativite, SpecConstante, SpecFonction, SpecOperateur};

/// Élément de la RPN, résolu contre le lexique.
#[derive(Clone, Copy, Debug)]
pub enum Rpn {
    Num(f64),
    Constante(&'static SpecConstante),
    Operateur(&'static SpecOperateur),
    Fonction(&'static SpecFonction),
}

#[derive(Clone, Copy, Debug)]
pub struct ElementRpn {
    pub rpn: Rpn,
    pub pos: usize,
}

impl fmt::Display for Rpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rpn::Num(v) => write!(f, "{v}"),
            Rpn::Constante(c) => f.write_str(c.nom),
            Rpn::Operateur(o) if o.arite() == 1 => write!(f, "{}u", o.symbole),
            Rpn::Operateur(o) => write!(f, "{}", o.symbole),
            Rpn::Fonction(fonc) => f.write_str(fonc.nom),
        }
    }
}

/// Format utilitaire (“démarche”) : RPN en texte, le moins unaire noté `-u`.
pub fn format_rpn(rpn: &[ElementRpn]) -> String {
    rpn.iter()
        .map(|e| e.rpn.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Contenu de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum SurPile {
    Operateur(&'static SpecOperateur, usize),
    Fonction(&'static SpecFonction, usize),
    Parenthese { pos: usize, virgules: usize },
}

/// État de la traduction (pile + sortie + “attend-on un opérande ?”).
struct Traduction {
    sortie: Vec<ElementRpn>,
    pile: Vec<SurPile>,
    attend_operande: bool,
}

impl Traduction {
    fn new(capacite: usize) -> Self {
        Self {
            sortie: Vec::with_capacity(capacite),
            pile: Vec::new(),
            attend_operande: true,
        }
    }

    fn sortir(&mut self, rpn: Rpn, pos: usize) {
        self.sortie.push(ElementRpn { rpn, pos });
    }

    /// Opérateur binaire : dépile tant que le sommet l’emporte, puis empile.
    fn binaire(&mut self, op: &'static SpecOperateur, pos: usize) {
        while let Some(SurPile::Operateur(sommet, p)) = self.pile.last().copied() {
            let doit_pop = sommet.precedence > op.precedence
                || (sommet.precedence == op.precedence && op.assoc == Associativite::Gauche);
            if !doit_pop {
                break;
            }
            self.pile.pop();
            self.sortir(Rpn::Operateur(sommet), p);
        }
        self.pile.push(SurPile::Operateur(op, pos));
        self.attend_operande = true;
    }

    /// Juxtaposition “valeur valeur” : '*' implicite.
    fn multiplication_implicite(&mut self, pos: usize) {
        if !self.attend_operande {
            self.binaire(lexique().multiplication(), pos);
        }
    }

    /// Dépile les opérateurs jusqu’à la '(' la plus proche (laissée sur la pile).
    /// Retourne false si la pile se vide avant.
    fn vider_jusqu_a_parenthese(&mut self) -> bool {
        while let Some(sommet) = self.pile.last().copied() {
            match sommet {
                SurPile::Parenthese { .. } => return true,
                SurPile::Operateur(op, p) => {
                    self.pile.pop();
                    self.sortir(Rpn::Operateur(op), p);
                }
                // une fonction est toujours sous sa '(' : on ne la croise pas ici
                SurPile::Fonction(f, p) => {
                    self.pile.pop();
                    self.sortir(Rpn::Fonction(f), p);
                }
            }
        }
        false
    }

    /// Fonction juste sous la '(' au sommet, si elle existe.
    fn fonction_sous_parenthese(&self) -> Option<(&'static SpecFonction, usize)> {
        let n = self.pile.len();
        if n < 2 {
            return None;
        }
        match self.pile[n - 2] {
            SurPile::Fonction(f, p) => Some((f, p)),
            _ => None,
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Op('/'), Num(2), RPar]
///   rpn:    [pi, 2, /, sin]
pub fn to_rpn(tokens: &[Jeton]) -> Result<Vec<ElementRpn>, ErreurSyntaxe> {
    let lex = lexique();
    let mut t = Traduction::new(tokens.len());

    for (i, jeton) in tokens.iter().enumerate() {
        let pos = jeton.pos;
        match &jeton.tok {
            Tok::Num(v) => {
                t.multiplication_implicite(pos);
                t.sortir(Rpn::Num(*v), pos);
                t.attend_operande = false;
            }

            Tok::Ident(nom) => {
                if let Some(f) = lex.fonction(nom) {
                    if !matches!(tokens.get(i + 1).map(|j| &j.tok), Some(Tok::LPar)) {
                        return Err(ErreurSyntaxe::FonctionSansParenthese {
                            nom: nom.clone(),
                            pos,
                        });
                    }
                    t.multiplication_implicite(pos);
                    t.pile.push(SurPile::Fonction(f, pos));
                    t.attend_operande = true;
                } else if let Some(c) = lex.constante(nom) {
                    t.multiplication_implicite(pos);
                    t.sortir(Rpn::Constante(c), pos);
                    t.attend_operande = false;
                } else {
                    return Err(ErreurSyntaxe::IdentifiantInconnu {
                        nom: nom.clone(),
                        pos,
                    });
                }
            }

            Tok::Op(c) => {
                if t.attend_operande {
                    // position unaire : seuls '+' et '-' sont admis
                    let op = lex
                        .operateur_unaire(*c)
                        .ok_or(ErreurSyntaxe::OperandeManquant { pos })?;
                    t.pile.push(SurPile::Operateur(op, pos));
                } else {
                    let op = lex
                        .operateur_binaire(*c)
                        .ok_or(ErreurSyntaxe::OperandeManquant { pos })?;
                    t.binaire(op, pos);
                }
            }

            Tok::LPar => {
                // "sin(" : la fonction a déjà fait la multiplication implicite
                let apres_fonction = i > 0
                    && matches!(&tokens[i - 1].tok, Tok::Ident(n) if lex.fonction(n).is_some());
                if !apres_fonction {
                    t.multiplication_implicite(pos);
                }
                t.pile.push(SurPile::Parenthese { pos, virgules: 0 });
                t.attend_operande = true;
            }

            Tok::RPar => {
                if t.attend_operande {
                    // "f()" : la '(' est au sommet, aucun argument lu
                    if let (Some(SurPile::Parenthese { virgules: 0, .. }), Some((f, _))) =
                        (t.pile.last(), t.fonction_sous_parenthese())
                    {
                        return Err(ErreurSyntaxe::NombreArguments {
                            nom: f.nom.to_string(),
                            attendus: f.arite,
                            recus: 0,
                            pos,
                        });
                    }
                    return Err(ErreurSyntaxe::OperandeManquant { pos });
                }
                if !t.vider_jusqu_a_parenthese() {
                    return Err(ErreurSyntaxe::ParentheseNonOuverte { pos });
                }
                let fonction = t.fonction_sous_parenthese();
                let virgules = match t.pile.pop() {
                    Some(SurPile::Parenthese { virgules, .. }) => virgules,
                    _ => 0,
                };
                if let Some((f, p)) = fonction {
                    let recus = virgules + 1;
                    if recus != f.arite {
                        return Err(ErreurSyntaxe::NombreArguments {
                            nom: f.nom.to_string(),
                            attendus: f.arite,
                            recus,
                            pos: p,
                        });
                    }
                    t.pile.pop();
                    t.sortir(Rpn::Fonction(f), p);
                }
                t.attend_operande = false;
            }

            Tok::Virgule => {
                if t.attend_operande {
                    return Err(ErreurSyntaxe::OperandeManquant { pos });
                }
                if !t.vider_jusqu_a_parenthese() || t.fonction_sous_parenthese().is_none() {
                    return Err(ErreurSyntaxe::SeparateurMalPlace { pos });
                }
                if let Some(SurPile::Parenthese { virgules, .. }) = t.pile.last_mut() {
                    *virgules += 1;
                }
                t.attend_operande = true;
            }
        }
    }

    // fin d’entrée
    if t.attend_operande {
        return Err(match tokens.last() {
            None => ErreurSyntaxe::ExpressionVide,
            Some(Jeton {
                tok: Tok::Op(c),
                pos,
            }) => ErreurSyntaxe::OperateurPendant {
                symbole: *c,
                pos: *pos,
            },
            Some(j) => match parenthese_ouverte(&t.pile) {
                Some(p) => ErreurSyntaxe::ParentheseNonFermee { pos: p },
                None => ErreurSyntaxe::OperandeManquant { pos: j.pos },
            },
        });
    }

    while let Some(sommet) = t.pile.pop() {
        match sommet {
            SurPile::Operateur(op, p) => t.sortir(Rpn::Operateur(op), p),
            SurPile::Fonction(f, p) => t.sortir(Rpn::Fonction(f), p),
            SurPile::Parenthese { pos, .. } => {
                return Err(ErreurSyntaxe::ParentheseNonFermee { pos })
            }
        }
    }

    Ok(t.sortie)
}

/// Position de la '(' non fermée la plus interne.
fn parenthese_ouverte(pile: &[SurPile]) -> Option<usize> {
    pile.iter().rev().find_map(|s| match s {
        SurPile::Parenthese { pos, .. } => Some(*pos),
        _ => None,
    })
}
