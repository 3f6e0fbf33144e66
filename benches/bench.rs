use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use trisat::sat::cnf::Cnf;
use trisat::sat::dpll::{Dpll, DpllConfig};
use trisat::sat::gsat::{Gsat, GsatConfig, SuccessorScan};
use trisat::sat::solver::Solver;
use trisat::sat::walksat::{WalkSat, WalkSatConfig};

/// Uniform random 3-SAT: three distinct symbols per clause, random signs.
fn random_3sat(rng: &mut fastrand::Rng, num_vars: usize, num_clauses: usize) -> Cnf {
    let clauses = (0..num_clauses)
        .map(|_| {
            let mut clause: Vec<i32> = Vec::with_capacity(3);
            while clause.len() < 3 {
                let var = i32::try_from(rng.usize(1..=num_vars)).unwrap();
                if clause.iter().any(|l| l.abs() == var) {
                    continue;
                }
                clause.push(if rng.bool() { var } else { -var });
            }
            clause
        })
        .collect::<Vec<_>>();
    Cnf::new(num_vars, clauses).unwrap()
}

/// Instances at the given clause/variable ratio, keeping only satisfiable
/// ones so the local search benchmarks measure time to a model.
fn satisfiable_instances(seed: u64, num_vars: usize, ratio: f64, count: usize) -> Vec<Cnf> {
    let mut rng = fastrand::Rng::with_seed(seed);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let num_clauses = (num_vars as f64 * ratio) as usize;
    let mut cnfs = Vec::with_capacity(count);
    while cnfs.len() < count {
        let cnf = random_3sat(&mut rng, num_vars, num_clauses);
        if Dpll::new(cnf.clone()).solve().is_sat() {
            cnfs.push(cnf);
        }
    }
    cnfs
}

fn bench_dpll(c: &mut Criterion) {
    let mut group = c.benchmark_group("uf20 - DPLL");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let mut rng = fastrand::Rng::with_seed(7);
    let cnfs: Vec<Cnf> = (0..20).map(|_| random_3sat(&mut rng, 20, 91)).collect();

    let configs = [
        ("both rules", DpllConfig::default()),
        (
            "unit propagation only",
            DpllConfig {
                pure_literals: false,
                unit_propagation: true,
            },
        ),
        (
            "pure literals only",
            DpllConfig {
                pure_literals: true,
                unit_propagation: false,
            },
        ),
    ];

    for (name, config) in configs {
        group.bench_function(name, |b| {
            b.iter(|| {
                for cnf in &cnfs {
                    let mut solver = Dpll::with_config(cnf.clone(), config);
                    black_box(solver.solve());
                }
            });
        });
    }

    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("uf50 - local search");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let cnfs = satisfiable_instances(11, 50, 4.0, 10);

    for scan in [SuccessorScan::Independent, SuccessorScan::Cumulative] {
        group.bench_function(format!("GSAT {scan}"), |b| {
            b.iter(|| {
                for (seed, cnf) in (0..).zip(&cnfs) {
                    let config = GsatConfig::new(10, 250)
                        .with_scan(scan)
                        .with_seed(Some(seed));
                    black_box(Gsat::new(cnf.clone(), config).solve());
                }
            });
        });
    }

    for noise in [0.2, 0.5] {
        group.bench_function(format!("WalkSAT p={noise}"), |b| {
            b.iter(|| {
                for (seed, cnf) in (0..).zip(&cnfs) {
                    let config = WalkSatConfig::new(noise, 20_000)
                        .unwrap()
                        .with_seed(Some(seed));
                    black_box(WalkSat::new(cnf.clone(), config).solve());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dpll, bench_local_search);

criterion_main!(benches);
