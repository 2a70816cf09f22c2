//! SBRG flow of a disordered transverse-field Ising chain.
//!
//! Run with: cargo run --example tfim -p braid-sbrg

use braid_pauli::{Pauli, PauliPolynomial};
use braid_sbrg::Sbrg;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let n = 10;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut terms = Vec::new();
    for i in 0..n - 1 {
        let mut s = vec!['I'; n];
        s[i] = 'Z';
        s[i + 1] = 'Z';
        let coupling: f64 = rng.gen_range(0.5..1.5);
        terms.push((Pauli::parse(&s.iter().collect::<String>())?, -coupling));
    }
    for i in 0..n {
        let mut s = vec!['I'; n];
        s[i] = 'X';
        let field: f64 = rng.gen_range(0.1..0.4);
        terms.push((Pauli::parse(&s.iter().collect::<String>())?, -field));
    }
    let h = PauliPolynomial::from_terms(n, terms);
    println!("input:  {} terms, λ = {:.4}", h.len(), h.lambda());

    let out = Sbrg::new(h).with_max_rate(2.0)?.with_tol(1e-10)?.run()?;
    println!(
        "output: {} terms, λ = {:.4}, circuit depth {}",
        out.effective.len(),
        out.effective.lambda(),
        out.circuit.depth()
    );
    println!("strongest effective terms:");
    for t in out.effective.terms().iter().take(8) {
        println!("  {:+.4}  {}", t.coeff, t.pauli);
    }
    Ok(())
}
