use arps_decline::{
    CurveFitAlgorithm, CurveFitTrait, DeclineParameters, EstimateCurveFit, GridSearchCurveFit,
    InitialGuess, TimeSeries, TypeCurveAggregator,
};
use arps_decline_test_util::WELLS_F64;
use criterion::Criterion;
use ndarray::Array1;
use rand::prelude::*;
use rand_distr::StandardNormal;
use std::hint::black_box;

fn noisy_series(n: usize) -> TimeSeries<f64> {
    let mut rng = StdRng::seed_from_u64(0);
    let params = DeclineParameters::new(1000.0, 0.5, 0.05);
    let t = Array1::linspace(0.0, 365.0, n);
    let q = t.mapv(|t| {
        let noise: f64 = rng.sample(StandardNormal);
        params.rate(t) * (1.0 + 0.05 * noise)
    });
    TimeSeries::new(t, q).unwrap()
}

pub fn bench_fit_lattice(c: &mut Criterion) {
    let curve_fitters: Vec<(_, CurveFitAlgorithm)> = vec![
        ("Estimate", EstimateCurveFit::default().into()),
        ("Grid search", GridSearchCurveFit::default().into()),
    ];

    for n in [10, 100, 1000] {
        let ts = noisy_series(n);
        for (name, curve_fit) in curve_fitters.iter() {
            c.bench_function(&format!("{name} fit, {n} points"), |b| {
                b.iter(|| curve_fit.curve_fit(black_box(&ts), &InitialGuess::none()));
            });
        }
    }
}

pub fn bench_fit_fixture_wells(c: &mut Criterion) {
    let ts_: Vec<_> = WELLS_F64
        .iter()
        .flat_map(|(_, production)| production.phases().map(|(_, arrays)| arrays.clone()))
        .map(|(t, q)| TimeSeries::new(t, q).unwrap())
        .collect();
    let curve_fit = GridSearchCurveFit::default();

    c.bench_function("Grid search fit of fixture wells", |b| {
        b.iter(|| {
            ts_.iter().for_each(|ts| {
                let _ = curve_fit.curve_fit(black_box(ts), &InitialGuess::none());
            });
        });
    });
}

pub fn bench_type_curve(c: &mut Criterion) {
    let wells: Vec<_> = WELLS_F64
        .iter()
        .map(|(_, production)| TimeSeries::new(production.oil.0.clone(), production.oil.1.clone()))
        .collect::<Result<_, _>>()
        .unwrap();
    let aggregator = TypeCurveAggregator::default();

    c.bench_function("Oil type curve of fixture wells", |b| {
        b.iter(|| aggregator.fit(black_box(&wells)));
    });
}
