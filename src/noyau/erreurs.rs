// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du moteur
// -------------------------------
// - ErreurLexicale : étape jetons (caractère inconnu, littéral mal formé)
// - ErreurSyntaxe  : étape RPN (parenthèses, opérandes, identifiants)
// - ErreurEval     : étape calcul (division par zéro, domaine, pile)
// - ErreurMoteur   : enveloppe publique, annotée par l’étape d’origine
//
// Les positions sont des index de caractères (0 = premier caractère).

use thiserror::Error;

/// Étape du pipeline où l’échec s’est produit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etape {
    Tokenisation,
    Traduction,
    Evaluation,
}

impl std::fmt::Display for Etape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Etape::Tokenisation => "jetons",
            Etape::Traduction => "RPN",
            Etape::Evaluation => "calcul",
        };
        f.write_str(s)
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurLexicale {
    #[error("caractère inattendu '{car}' (position {pos})")]
    CaractereInattendu { car: char, pos: usize },

    #[error("nombre mal formé « {texte} » (position {pos})")]
    NombreMalForme { texte: String, pos: usize },

    #[error("nombre inachevé « {texte} » (position {pos})")]
    NombreInacheve { texte: String, pos: usize },
}

impl ErreurLexicale {
    pub fn position(&self) -> usize {
        match self {
            ErreurLexicale::CaractereInattendu { pos, .. }
            | ErreurLexicale::NombreMalForme { pos, .. }
            | ErreurLexicale::NombreInacheve { pos, .. } => *pos,
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurSyntaxe {
    #[error("entrée vide")]
    ExpressionVide,

    #[error("parenthèse non fermée (position {pos})")]
    ParentheseNonFermee { pos: usize },

    #[error("parenthèse fermante sans ouvrante (position {pos})")]
    ParentheseNonOuverte { pos: usize },

    #[error("identifiant inconnu « {nom} » (position {pos})")]
    IdentifiantInconnu { nom: String, pos: usize },

    #[error("séparateur ',' hors d’une liste d’arguments (position {pos})")]
    SeparateurMalPlace { pos: usize },

    #[error("opérande manquant (position {pos})")]
    OperandeManquant { pos: usize },

    #[error("opérateur '{symbole}' sans opérande à droite (position {pos})")]
    OperateurPendant { symbole: char, pos: usize },

    #[error("fonction « {nom} » sans parenthèse ouvrante (position {pos})")]
    FonctionSansParenthese { nom: String, pos: usize },

    #[error("« {nom} » attend {attendus} argument(s), reçu {recus} (position {pos})")]
    NombreArguments {
        nom: String,
        attendus: usize,
        recus: usize,
        pos: usize,
    },
}

impl ErreurSyntaxe {
    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurSyntaxe::ExpressionVide => None,
            ErreurSyntaxe::ParentheseNonFermee { pos }
            | ErreurSyntaxe::ParentheseNonOuverte { pos }
            | ErreurSyntaxe::IdentifiantInconnu { pos, .. }
            | ErreurSyntaxe::SeparateurMalPlace { pos }
            | ErreurSyntaxe::OperandeManquant { pos }
            | ErreurSyntaxe::OperateurPendant { pos, .. }
            | ErreurSyntaxe::FonctionSansParenthese { pos, .. }
            | ErreurSyntaxe::NombreArguments { pos, .. } => Some(*pos),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurEval {
    #[error("division par zéro (position {pos})")]
    DivisionParZero { pos: usize },

    #[error("modulo par zéro (position {pos})")]
    ModuloParZero { pos: usize },

    #[error("hors domaine : {detail} (position {pos})")]
    HorsDomaine { detail: String, pos: usize },

    #[error("dépassement de capacité (position {pos})")]
    Depassement { pos: usize },

    /// Défense en profondeur : inatteignable après une traduction réussie.
    #[error("pile insuffisante pour « {symbole} » (position {pos})")]
    PileInsuffisante { symbole: String, pos: usize },

    /// Défense en profondeur : la pile doit finir avec exactement une valeur.
    #[error("pile incohérente en fin de calcul ({restants} valeur(s))")]
    PileIncoherente { restants: usize },
}

impl ErreurEval {
    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurEval::DivisionParZero { pos }
            | ErreurEval::ModuloParZero { pos }
            | ErreurEval::HorsDomaine { pos, .. }
            | ErreurEval::Depassement { pos }
            | ErreurEval::PileInsuffisante { pos, .. } => Some(*pos),
            ErreurEval::PileIncoherente { .. } => None,
        }
    }

    /// Vrai pour les erreurs de cohérence interne (pas un chemin utilisateur).
    pub fn est_interne(&self) -> bool {
        matches!(
            self,
            ErreurEval::PileInsuffisante { .. } | ErreurEval::PileIncoherente { .. }
        )
    }
}

/// Erreur publique du moteur : la première erreur rencontrée, intacte,
/// rangée sous l’étape qui l’a produite.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurMoteur {
    #[error("erreur lexicale : {0}")]
    Lexicale(#[from] ErreurLexicale),

    #[error("erreur de syntaxe : {0}")]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error("erreur de calcul : {0}")]
    Evaluation(#[from] ErreurEval),
}

impl ErreurMoteur {
    pub fn etape(&self) -> Etape {
        match self {
            ErreurMoteur::Lexicale(_) => Etape::Tokenisation,
            ErreurMoteur::Syntaxe(_) => Etape::Traduction,
            ErreurMoteur::Evaluation(_) => Etape::Evaluation,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            ErreurMoteur::Lexicale(e) => Some(e.position()),
            ErreurMoteur::Syntaxe(e) => e.position(),
            ErreurMoteur::Evaluation(e) => e.position(),
        }
    }
}

/// Configuration refusée à la construction.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurConfig {
    #[error("précision {precision} hors bornes [{min}, {max}]")]
    PrecisionHorsBornes { precision: u32, min: u8, max: u8 },
}
