// src/noyau/jetons.rs

use super::erreurs::ErreurLexicale;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (normalisés en minuscules)
    // NOTE: la RPN décidera si c’est une fonction ou une constante (ou un inconnu).
    Ident(String),

    // + - * / ^ %  (le moins unaire n’est PAS distingué ici)
    Op(char),

    LPar,
    RPar,
    Virgule, // séparateur d’arguments
}

/// Jeton + position (index de caractère) pour les messages d’erreur.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

impl Jeton {
    fn new(tok: Tok, pos: usize) -> Self {
        Self { tok, pos }
    }
}

fn est_chiffre_ou_point(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5) + exposant collé (ex: 1e3, 2.5E-2)
/// - opérateurs + - * / ^ %, parenthèses ( ), séparateur ,
/// - identifiants [a-zA-Z][a-zA-Z0-9_]* (normalisés en minuscules)
/// - π (= pi), √ (= sqrt), × (= *), ÷ (= /)
///
/// Pas de multiplication implicite ni de moins unaire ici (voir rpn.rs).
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurLexicale> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut i: usize = 0;

    while i < n {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => out.push(Jeton::new(Tok::LPar, i)),
            ')' => out.push(Jeton::new(Tok::RPar, i)),
            ',' => out.push(Jeton::new(Tok::Virgule, i)),
            '+' | '-' | '*' | '/' | '^' | '%' => out.push(Jeton::new(Tok::Op(c), i)),
            '×' => out.push(Jeton::new(Tok::Op('*'), i)),
            '÷' => out.push(Jeton::new(Tok::Op('/'), i)),
            'π' => out.push(Jeton::new(Tok::Ident("pi".to_string()), i)),
            '√' => out.push(Jeton::new(Tok::Ident("sqrt".to_string()), i)),
            _ => {
                if c.is_ascii_alphabetic() {
                    let start = i;
                    i += 1;
                    while i < n && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                        i += 1;
                    }
                    let word: String = chars[start..i].iter().collect();
                    out.push(Jeton::new(Tok::Ident(word.to_lowercase()), start));
                    continue;
                }

                if est_chiffre_ou_point(c) {
                    let (valeur, fin) = lire_nombre(&chars, i)?;
                    out.push(Jeton::new(Tok::Num(valeur), i));
                    i = fin;
                    continue;
                }

                return Err(ErreurLexicale::CaractereInattendu { car: c, pos: i });
            }
        }
        i += 1;
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `start`. Retourne (valeur, index de fin).
///
/// - une seule virgule décimale ('.') : "1.2.3" -> mal formé
/// - exposant e/E [+/-] chiffres, seulement s’il suit directement la mantisse ;
///   "2e" ou "2exp(1)" laissent 'e' à l’identifiant (2·e, 2·exp(1))
/// - "1e+" / "1e-" sans chiffre derrière -> inachevé (même suivi d’autre chose)
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), ErreurLexicale> {
    let n = chars.len();
    let texte = |fin: usize| -> String { chars[start..fin].iter().collect() };
    let mal_forme = |fin: usize| ErreurLexicale::NombreMalForme {
        texte: texte(fin),
        pos: start,
    };

    let mut i = start;
    let mut point = false;
    let mut chiffres = 0usize;
    while i < n && est_chiffre_ou_point(chars[i]) {
        if chars[i] == '.' {
            if point {
                // on avale toute la suite pour un message complet
                while i < n && est_chiffre_ou_point(chars[i]) {
                    i += 1;
                }
                return Err(mal_forme(i));
            }
            point = true;
        } else {
            chiffres += 1;
        }
        i += 1;
    }

    // "." seul (ou ".+") : pas de chiffre
    if chiffres == 0 {
        return Err(mal_forme(i));
    }

    if i < n && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < n && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < n && chars[j].is_ascii_digit() {
            while j < n && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
            // 1e5.2
            if i < n && chars[i] == '.' {
                while i < n && est_chiffre_ou_point(chars[i]) {
                    i += 1;
                }
                return Err(mal_forme(i));
            }
        } else if j > i + 1 {
            // signe sans chiffre : "1e+", "1e+ 2", "(1e-)"
            return Err(ErreurLexicale::NombreInacheve {
                texte: texte(j),
                pos: start,
            });
        }
    }

    let valeur = texte(i).parse::<f64>().map_err(|_| mal_forme(i))?;
    Ok((valeur, i))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match &t.tok {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),
            Tok::Op(c) => c.to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
