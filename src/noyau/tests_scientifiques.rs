//! Tests scientifiques (campagne) : propriétés attendues du noyau.
//!
//! - valeurs de référence (précédence, parenthèses, associativité)
//! - erreurs classées (une par chemin d’échec)
//! - pureté : même entrée => même sortie, threads sans interférence

use std::thread;
use std::time::{Duration, Instant};

use super::{evaluate_expression, ErrorKind};

fn eval_ok(expr: &str) -> f64 {
    evaluate_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_err(expr: &str, attendu: ErrorKind) {
    assert_eq!(evaluate_expression(expr), Err(attendu), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Valeurs de référence ------------------------ */

#[test]
fn sci_litteraux_seuls() {
    for s in ["0", "7", "42", "3.25", "0.5", "1000000", "007", "5.", ".5"] {
        let attendu: f64 = s.parse().unwrap();
        assert_eq!(eval_ok(s), attendu, "littéral {s:?}");
    }
    // espaces autour : même valeur
    assert_eq!(eval_ok("  12.5  "), 12.5);
}

#[test]
fn sci_precedence() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eq!(eval_ok("2 + 3 * 4"), 14.0);
    assert_eq!(eval_ok("10-6/2"), 7.0);
    assert_eq!(eval_ok("1+2*3-4/2"), 5.0);
}

#[test]
fn sci_parentheses_prioritaires() {
    assert_eq!(eval_ok("(2+3)*4"), 20.0);
    assert_eq!(eval_ok("2*(3+4)*5"), 70.0);
    assert_eq!(eval_ok("((2+3)*(4-1))/5"), 3.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_eq!(eval_ok("8-4-2"), 2.0);
    assert_eq!(eval_ok("100/10/5"), 2.0);
    assert_eq!(eval_ok("2*6/3"), 4.0);
    assert_eq!(eval_ok("1-2+3"), 2.0);
}

#[test]
fn sci_flottants_ieee() {
    // sémantique f64 standard, pas d’arrondi décimal
    assert_eq!(eval_ok("0.1+0.2"), 0.1 + 0.2);
    assert_eq!(eval_ok("1/3"), 1.0 / 3.0);
    // dépassement : infini IEEE (seule la division par zéro est une erreur)
    let grand = format!("1{}", "0".repeat(308));
    assert!(eval_ok(&format!("{grand}*10")).is_infinite());
}

/* ------------------------ Erreurs classées ------------------------ */

#[test]
fn sci_erreurs_classees() {
    assert_err("10/0", ErrorKind::DivisionByZero);
    assert_err("(1+2", ErrorKind::UnbalancedParens);
    assert_err("1+2)", ErrorKind::UnbalancedParens);
    assert_err("1*", ErrorKind::InsufficientOperands("*".into()));
    assert_err("3 4", ErrorKind::MalformedExpression);
    assert_err("1..5", ErrorKind::MalformedNumber("1..5".into()));

    assert!(matches!(
        evaluate_expression("2+@"),
        Err(ErrorKind::UnknownSymbol { symbole: '@', .. })
    ));
    // non-ASCII : pas de panique sur une frontière d’octet
    assert!(matches!(
        evaluate_expression("2×3"),
        Err(ErrorKind::UnknownSymbol { symbole: '×', position: 1 })
    ));
}

#[test]
fn sci_messages_lisibles() {
    assert_eq!(ErrorKind::DivisionByZero.to_string(), "division par zéro");
    assert_eq!(
        ErrorKind::UnknownSymbol {
            symbole: '@',
            position: 2
        }
        .to_string(),
        "symbole inconnu '@' (position 2)"
    );
}

/* ------------------------ Pureté / concurrence ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["2+3*4", "(1.5+2.25)/3", "8-4-2", "10/0", "(1"] {
        assert_eq!(evaluate_expression(expr), evaluate_expression(expr), "{expr:?}");
    }
}

#[test]
fn sci_threads_sans_interference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let cas: Vec<(String, f64)> = (1..=8)
        .map(|k| (format!("({k}+{k})*{k}-{k}/{k}"), (2 * k * k - 1) as f64))
        .collect();

    thread::scope(|s| {
        for (expr, attendu) in &cas {
            s.spawn(move || {
                for _ in 0..500 {
                    assert_eq!(evaluate_expression(expr), Ok(*attendu), "expr={expr:?}");
                }
            });
        }
    });

    budget(t0, max);
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // piles explicites : pas de récursion, donc pas de risque de débordement
    let n = 5000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_ok(&expr), 1.0);

    let expr = format!("{}1", "(".repeat(n));
    assert_err(&expr, ErrorKind::UnbalancedParens);

    budget(t0, max);
}

#[test]
fn sci_longue_somme() {
    let expr = vec!["0.5"; 2000].join("+");
    assert_eq!(eval_ok(&expr), 1000.0);
}
