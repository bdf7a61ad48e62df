use approx::assert_abs_diff_eq;
use river::root_finding::errors::RootFindingError;
use river::root_finding::regula_falsi::{
    regula_falsi, RegulaFalsiCfg, RegulaFalsiError, RegulaFalsiVariant
};
use river::root_finding::report::{
    RootFindingReport, Stencil, TerminationReason, ToleranceSatisfied
};
use test_log::test;

type RiverResult = Result<(), RegulaFalsiError>;

fn variants() -> [(RegulaFalsiVariant, &'static str); 2] {
    [
        (RegulaFalsiVariant::Illinois, "regula_falsi_illinois"),
        (RegulaFalsiVariant::Pure,     "regula_falsi_pure"),
    ]
}

fn base_cfg(v: RegulaFalsiVariant) -> RegulaFalsiCfg {
    RegulaFalsiCfg::new().set_variant(v)
}

fn bounds(res: &RootFindingReport) -> (f64, f64) {
    match res.stencil {
        Stencil::Bracket { bounds } => (bounds[0], bounds[1]),
        _ => panic!("expected Bracket stencil"),
    }
}

fn assert_bracket_invariant<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) {
    let fa = f(a);
    let fb = f(b);

    assert!(fa.is_finite() && fb.is_finite());
    assert!(fa.is_sign_positive() != fb.is_sign_positive());
}


#[test]
fn sqrt2_all() -> RiverResult {
    let f = |x: f64| x.powi(2) - 2.0;

    for (variant, name) in variants() {
        let res = regula_falsi(f, 0.0, 2.0, base_cfg(variant))?;

        assert_eq!(res.termination_reason,  TerminationReason::ToleranceReached, "variant={name}");
        assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached, "variant={name}");
        assert_eq!(res.algorithm_name, name);
        assert!(res.f_root.abs() < 1e-6, "variant={name}");
        assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);

        let (a, b) = bounds(&res);
        assert_bracket_invariant(&f, a, b);
    }
    Ok(())
}

#[test]
fn linear_converges_in_one_step() -> RiverResult {
    let f = |x: f64| 2.0 * x - 6.0;

    for (variant, name) in variants() {
        let res = regula_falsi(f, 0.0, 10.0, base_cfg(variant))?;

        assert_eq!(res.termination_reason, TerminationReason::ToleranceReached, "variant={name}");
        assert_eq!(res.iterations, 1, "variant={name}");
        assert_abs_diff_eq!(res.root, 3.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn illinois_not_slower_than_pure_on_flat_side() -> RiverResult {
    let f = |x: f64| x.powi(5) - 1.0;

    let illinois = regula_falsi(f, 0.0, 2.0, base_cfg(RegulaFalsiVariant::Illinois))?;
    let pure     = regula_falsi(f, 0.0, 2.0, base_cfg(RegulaFalsiVariant::Pure))?;

    assert_eq!(illinois.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(illinois.root, 1.0, epsilon = 1e-6);
    assert!(
        illinois.iterations <= pure.iterations,
        "illinois={} pure={}", illinois.iterations, pure.iterations
    );
    Ok(())
}

#[test]
fn first_retention_does_not_halve() -> RiverResult {
    // after one iteration `b` has been retained once: both variants agree
    let f   = |x: f64| x.powi(3) - 0.5;
    let ill = regula_falsi(f, 0.0, 1.0, base_cfg(RegulaFalsiVariant::Illinois).set_max_iter(1)?)?;
    let pur = regula_falsi(f, 0.0, 1.0, base_cfg(RegulaFalsiVariant::Pure).set_max_iter(1)?)?;

    assert_eq!(ill.root, pur.root);
    assert_eq!(ill.stencil, pur.stencil);
    Ok(())
}

#[test]
fn second_retention_halves_stuck_endpoint() -> RiverResult {
    let f = |x: f64| x.powi(3) - 0.5;

    let ill = regula_falsi(f, 0.0, 1.0, base_cfg(RegulaFalsiVariant::Illinois).set_max_iter(2)?)?;
    let pur = regula_falsi(f, 0.0, 1.0, base_cfg(RegulaFalsiVariant::Pure).set_max_iter(2)?)?;

    // same bracket, but illinois interpolates with f(b) halved
    assert_eq!(ill.stencil, pur.stencil);
    let (a, b) = bounds(&ill);
    assert_abs_diff_eq!(a, 0.714_285_714_285_714_3, epsilon = 1e-12);
    assert_eq!(b, 1.0);

    assert!(ill.root > 0.81, "illinois={}", ill.root);
    assert!(pur.root < 0.78, "pure={}", pur.root);
    Ok(())
}

#[test]
fn iteration_cap_returns_best_effort() -> RiverResult {
    let f   = |x: f64| x.powi(3) - 0.5;
    let cfg = RegulaFalsiCfg::new().set_max_iter(2)?;
    let res = regula_falsi(f, 0.0, 1.0, cfg)?;

    assert_eq!(res.termination_reason,  TerminationReason::IterationLimit);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(res.iterations, 2);
    assert_eq!(res.evaluations, 5);
    assert!(res.root.is_finite());
    assert_abs_diff_eq!(res.f_root, f(res.root));
    assert!(!res.is_converged());
    Ok(())
}

#[test]
fn large_finite_bounds_do_not_overflow() -> RiverResult {
    let f = |x: f64| x - 1.5e308;

    for (variant, name) in variants() {
        let res = regula_falsi(f, 1.0e308, 1.7e308, base_cfg(variant))?;

        assert!(res.root.is_finite(), "variant={name}");
        assert_abs_diff_eq!(res.root / 1.5e308, 1.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn default_cap_never_reports_failure() -> RiverResult {
    // no double makes |1e12 * (x^2 - 2)| < 1e-6, so only the cap can end the run
    let f   = |x: f64| 1e12 * (x * x - 2.0);
    let res = regula_falsi(f, 0.0, 2.0, RegulaFalsiCfg::new())?;

    assert_eq!(res.termination_reason,  TerminationReason::IterationLimit);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(res.iterations, 500);
    assert!(res.root.is_finite());
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-9);
    Ok(())
}

#[test]
fn endpoint_roots() -> RiverResult {
    let f = |x: f64| x - 1.0;

    for (variant, name) in variants() {
        let res = regula_falsi(f, 1.0, 3.0, base_cfg(variant))?;
        assert_eq!(res.root, 1.0, "variant={name}");
        assert_eq!(res.iterations, 0, "variant={name}");
        assert_eq!(res.termination_reason, TerminationReason::EndpointRoot, "variant={name}");

        let res = regula_falsi(f, -3.0, 1.0, base_cfg(variant))?;
        assert_eq!(res.root, 1.0, "variant={name}");
        assert_eq!(res.termination_reason, TerminationReason::EndpointRoot, "variant={name}");
    }
    Ok(())
}

#[test]
fn no_sign_change_all() {
    let f = |x: f64| x.exp();

    for (variant, name) in variants() {
        for (a, b) in [(-1.0, 1.0), (5.0, -5.0), (0.0, 0.0)] {
            let err = regula_falsi(f, a, b, base_cfg(variant)).unwrap_err();
            assert!(
                matches!(err, RegulaFalsiError::NoSignChange { .. }),
                "variant={name} a={a} b={b}"
            );
        }
    }
}

#[test]
fn non_finite_eval() {
    let f   = |x: f64| 1.0 / x;
    let err = regula_falsi(f, 0.0, 1.0, RegulaFalsiCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        RegulaFalsiError::RootFinding(RootFindingError::NonFiniteEvaluation { x, fx })
        if x == 0.0 && fx.is_infinite()));
}

#[test]
fn invalid_bounds() {
    let f   = |x: f64| x;
    let err = regula_falsi(f, f64::NEG_INFINITY, 1.0, RegulaFalsiCfg::new()).unwrap_err();

    assert!(matches!(err, RegulaFalsiError::InvalidBounds { .. }));
}

#[test]
fn default_variant_is_illinois() {
    assert_eq!(RegulaFalsiCfg::default().variant(), RegulaFalsiVariant::Illinois);
}

#[test]
fn identical_inputs_identical_reports() -> RiverResult {
    let f  = |x: f64| x.powi(5) - 1.0;
    let r1 = regula_falsi(f, 0.0, 2.0, RegulaFalsiCfg::new())?;
    let r2 = regula_falsi(f, 0.0, 2.0, RegulaFalsiCfg::new())?;

    assert_eq!(r1, r2);
    Ok(())
}
