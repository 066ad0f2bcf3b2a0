// src/noyau/lexique.rs
//
// Lexique : opérateurs, fonctions, constantes
// -------------------------------------------
// Table statique, construite une fois (OnceLock), jamais modifiée.
// Toutes les recherches se font par symbole / nom en minuscules.
//
// Précédences :
//   + -      : 1 (gauche)
//   * / %    : 2 (gauche)
//   ^        : 3 (droite)
//   ± unaire : 4 (droite, au-dessus de tout binaire)

use std::collections::HashMap;
use std::f64::consts::{E, PI, TAU};
use std::sync::OnceLock;

use super::config::UniteAngle;
use super::fonctions;
use super::nombre::{Issue, Nombre};
use super::trig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Règle d’un opérateur : l’arité découle de la forme.
#[derive(Clone, Copy, Debug)]
pub enum Regle {
    Unaire(fn(Nombre) -> Issue),
    Binaire(fn(Nombre, Nombre) -> Issue),
}

#[derive(Debug)]
pub struct SpecOperateur {
    pub symbole: char,
    pub precedence: u8,
    pub assoc: Associativite,
    pub regle: Regle,
}

impl SpecOperateur {
    pub fn arite(&self) -> usize {
        match self.regle {
            Regle::Unaire(_) => 1,
            Regle::Binaire(_) => 2,
        }
    }
}

/// Règle d’une fonction : reçoit l’unité d’angle (seule la trigo s’en sert).
pub type RegleFonction = fn(Nombre, UniteAngle) -> Issue;

#[derive(Debug)]
pub struct SpecFonction {
    pub nom: &'static str,
    pub arite: usize,
    pub regle: RegleFonction,
}

#[derive(Debug)]
pub struct SpecConstante {
    pub nom: &'static str,
    pub valeur: Nombre,
}

pub const PRECEDENCE_UNAIRE: u8 = 4;

/// Nombre d’or (1 + √5) / 2.
const PHI: f64 = 1.618_033_988_749_895;

/* ------------------------ Tables ------------------------ */

const fn binaire(
    symbole: char,
    precedence: u8,
    assoc: Associativite,
    f: fn(Nombre, Nombre) -> Issue,
) -> SpecOperateur {
    SpecOperateur {
        symbole,
        precedence,
        assoc,
        regle: Regle::Binaire(f),
    }
}

static BINAIRES: [SpecOperateur; 6] = [
    binaire('+', 1, Associativite::Gauche, Nombre::plus),
    binaire('-', 1, Associativite::Gauche, Nombre::moins),
    binaire('*', 2, Associativite::Gauche, Nombre::fois),
    binaire('/', 2, Associativite::Gauche, Nombre::divise),
    binaire('%', 2, Associativite::Gauche, Nombre::modulo),
    binaire('^', 3, Associativite::Droite, Nombre::puissance),
];

/// Index de '*' dans BINAIRES (multiplication implicite).
const MULTIPLICATION: usize = 2;

static UNAIRES: [SpecOperateur; 2] = [
    SpecOperateur {
        symbole: '-',
        precedence: PRECEDENCE_UNAIRE,
        assoc: Associativite::Droite,
        regle: Regle::Unaire(Nombre::oppose),
    },
    SpecOperateur {
        symbole: '+',
        precedence: PRECEDENCE_UNAIRE,
        assoc: Associativite::Droite,
        regle: Regle::Unaire(Nombre::identite),
    },
];

const fn f1(nom: &'static str, regle: RegleFonction) -> SpecFonction {
    SpecFonction {
        nom,
        arite: 1,
        regle,
    }
}

static FONCTIONS: [SpecFonction; 26] = [
    f1("sin", trig::sin),
    f1("cos", trig::cos),
    f1("tan", trig::tan),
    f1("asin", trig::asin),
    f1("acos", trig::acos),
    f1("atan", trig::atan),
    f1("sinh", fonctions::sinh),
    f1("cosh", fonctions::cosh),
    f1("tanh", fonctions::tanh),
    f1("ln", fonctions::ln),
    f1("log", fonctions::log10),
    f1("log2", fonctions::log2),
    f1("exp", fonctions::exp),
    f1("exp2", fonctions::exp2),
    f1("exp10", fonctions::exp10),
    f1("sqrt", fonctions::sqrt),
    f1("cbrt", fonctions::cbrt),
    f1("factorial", fonctions::factorielle),
    f1("fact", fonctions::factorielle),
    f1("gamma", fonctions::gamma),
    f1("abs", fonctions::abs),
    f1("sign", fonctions::sign),
    f1("floor", fonctions::floor),
    f1("ceil", fonctions::ceil),
    f1("round", fonctions::round),
    f1("trunc", fonctions::trunc),
];

static CONSTANTES: [SpecConstante; 6] = [
    SpecConstante {
        nom: "pi",
        valeur: Nombre::Reel(PI),
    },
    SpecConstante {
        nom: "e",
        valeur: Nombre::Reel(E),
    },
    SpecConstante {
        nom: "tau",
        valeur: Nombre::Reel(TAU),
    },
    SpecConstante {
        nom: "phi",
        valeur: Nombre::Reel(PHI),
    },
    SpecConstante {
        nom: "i",
        valeur: Nombre::I,
    },
    SpecConstante {
        nom: "j",
        valeur: Nombre::I,
    },
];

/* ------------------------ Lexique ------------------------ */

pub struct Lexique {
    binaires: HashMap<char, &'static SpecOperateur>,
    unaires: HashMap<char, &'static SpecOperateur>,
    fonctions: HashMap<&'static str, &'static SpecFonction>,
    constantes: HashMap<&'static str, &'static SpecConstante>,
}

static LEXIQUE: OnceLock<Lexique> = OnceLock::new();

/// Lexique partagé du processus (lecture seule).
pub fn lexique() -> &'static Lexique {
    LEXIQUE.get_or_init(Lexique::construire)
}

impl Lexique {
    fn construire() -> Self {
        Self {
            binaires: BINAIRES.iter().map(|o| (o.symbole, o)).collect(),
            unaires: UNAIRES.iter().map(|o| (o.symbole, o)).collect(),
            fonctions: FONCTIONS.iter().map(|f| (f.nom, f)).collect(),
            constantes: CONSTANTES.iter().map(|c| (c.nom, c)).collect(),
        }
    }

    pub fn operateur_binaire(&self, symbole: char) -> Option<&'static SpecOperateur> {
        self.binaires.get(&symbole).copied()
    }

    pub fn operateur_unaire(&self, symbole: char) -> Option<&'static SpecOperateur> {
        self.unaires.get(&symbole).copied()
    }

    pub fn multiplication(&self) -> &'static SpecOperateur {
        &BINAIRES[MULTIPLICATION]
    }

    pub fn fonction(&self, nom: &str) -> Option<&'static SpecFonction> {
        self.fonctions.get(nom).copied()
    }

    pub fn constante(&self, nom: &str) -> Option<&'static SpecConstante> {
        self.constantes.get(nom).copied()
    }

    /// Noms de fonctions, triés (aide de la ligne de commande).
    pub fn noms_fonctions(&self) -> Vec<&'static str> {
        let mut noms: Vec<_> = self.fonctions.keys().copied().collect();
        noms.sort_unstable();
        noms
    }
}
