//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariant clé : forme plate == forme entièrement parenthésée (gauche)
//! - texte arbitraire : toujours Ok ou erreur classée, jamais de panique

use std::time::{Duration, Instant};

use super::{evaluate_expression, ErrorKind};

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

/// Littéral non nul : les diviseurs sont toujours des littéraux (ou des produits de littéraux).
fn gen_litteral(rng: &mut Rng) -> String {
    let entier = 1 + rng.pick(99);
    match rng.pick(3) {
        0 => format!("{entier}.{}", 1 + rng.pick(9)),
        _ => format!("{entier}"),
    }
}

fn gen_op(rng: &mut Rng) -> char {
    ['+', '-', '*', '/'][rng.pick(4) as usize]
}

/// Suite plate: n0 op1 n1 op2 n2 ...
fn gen_plate(rng: &mut Rng, longueur: usize) -> (Vec<String>, Vec<char>) {
    let mut nombres = vec![gen_litteral(rng)];
    let mut ops = Vec::new();
    for _ in 0..longueur {
        ops.push(gen_op(rng));
        nombres.push(gen_litteral(rng));
    }
    (nombres, ops)
}

fn texte_plat(nombres: &[String], ops: &[char]) -> String {
    let mut s = nombres[0].clone();
    for (op, n) in ops.iter().zip(&nombres[1..]) {
        s.push(*op);
        s.push_str(n);
    }
    s
}

/// Forme entièrement parenthésée, associativité gauche :
/// d’abord les produits ((a*b)/c), puis les sommes (((t1+t2)-t3)...).
fn texte_parenthese(nombres: &[String], ops: &[char]) -> String {
    let mut termes: Vec<String> = vec![nombres[0].clone()];
    let mut liaisons: Vec<char> = Vec::new();

    for (op, n) in ops.iter().zip(&nombres[1..]) {
        match op {
            '*' | '/' => {
                let gauche = termes.pop().unwrap_or_default();
                termes.push(format!("({gauche}{op}{n})"));
            }
            _ => {
                liaisons.push(*op);
                termes.push(n.clone());
            }
        }
    }

    let mut s = termes[0].clone();
    for (op, t) in liaisons.iter().zip(&termes[1..]) {
        s = format!("({s}{op}{t})");
    }
    s
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_forme_plate_egale_forme_parenthesee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let longueur = rng.pick(12) as usize;
        let (nombres, ops) = gen_plate(&mut rng, longueur);
        let plat = texte_plat(&nombres, &ops);
        let par = texte_parenthese(&nombres, &ops);

        let a = evaluate_expression(&plat).unwrap_or_else(|e| panic!("plat={plat:?} err={e}"));
        let b = evaluate_expression(&par).unwrap_or_else(|e| panic!("par={par:?} err={e}"));

        // mêmes opérations dans le même ordre => mêmes bits
        assert_eq!(a.to_bits(), b.to_bits(), "plat={plat:?} par={par:?}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties
    let mut r1 = Rng::new(0xBADC0DE_u64);
    let mut r2 = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let n = rng_longueur(&mut r1);
        let (n1, o1) = gen_plate(&mut r1, n);
        let n = rng_longueur(&mut r2);
        let (n2, o2) = gen_plate(&mut r2, n);

        let e1 = texte_plat(&n1, &o1);
        let e2 = texte_plat(&n2, &o2);
        assert_eq!(e1, e2);
        assert_eq!(evaluate_expression(&e1), evaluate_expression(&e2));
    }
}

fn rng_longueur(rng: &mut Rng) -> usize {
    rng.pick(8) as usize
}

#[test]
fn fuzz_safe_texte_arbitraire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // alphabet volontairement “sale” : parenthèses, points, symboles, non-ASCII
    let alphabet: Vec<char> = "0123456789..+-*/(()) @xé".chars().collect();
    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let len = rng.pick(16) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        match evaluate_expression(&s) {
            Ok(_) => seen_ok += 1,
            Err(
                ErrorKind::UnknownSymbol { .. }
                | ErrorKind::MalformedNumber(_)
                | ErrorKind::InsufficientOperands(_)
                | ErrorKind::UnbalancedParens
                | ErrorKind::DivisionByZero
                | ErrorKind::MalformedExpression,
            ) => seen_err += 1,
            Err(e @ ErrorKind::UnknownOperator(_)) => {
                panic!("le tokenizer ne produit que + - * / : s={s:?} err={e}")
            }
        }
    }

    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
    assert!(seen_ok + seen_err == 2000);
}
