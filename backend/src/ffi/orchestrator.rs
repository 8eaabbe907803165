//! PyO3 wrapper for Orchestrator

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{ledger_entry_to_py, parse_simulation_config, summary_to_py};
use crate::orchestrator::Orchestrator as RustOrchestrator;

/// Python wrapper for the Rust orchestrator
///
/// # Example (from Python)
///
/// ```python
/// from shock_arb_simulator_core_rs import Simulation
///
/// sim = Simulation({"rng_seed": 123, "total_outlay": 200.0, "book_reject_prob": 0.05})
/// sim.run_for(40_000.0)
/// print(sim.summary()["realized_pnl"])
/// ```
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: RustOrchestrator,
}

#[pymethods]
impl PySimulation {
    /// Create a simulation from a configuration dict
    ///
    /// Raises ValueError on unknown types or invalid values.
    #[new]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_simulation_config(config)?;

        let inner = RustOrchestrator::new(rust_config).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create simulation: {}",
                e
            ))
        })?;

        Ok(PySimulation { inner })
    }

    /// Advance simulated time by `duration_ms`; returns events dispatched
    fn run_for(&mut self, duration_ms: f64) -> PyResult<u64> {
        let stats = self
            .inner
            .run_for(duration_ms)
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(format!("Run failed: {}", e)))?;
        Ok(stats.dispatched)
    }

    /// Time of the last dispatched event (ms)
    fn current_time(&self) -> f64 {
        self.inner.current_time()
    }

    /// Aggregates of the run so far
    fn summary(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let summary = self
            .inner
            .summary()
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;
        summary_to_py(py, &summary)
    }

    /// Every ledger entry, in the order attempts closed
    fn ledger(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        let list = PyList::empty_bound(py);
        for entry in self.inner.ledger().entries() {
            list.append(ledger_entry_to_py(py, entry)?)?;
        }
        Ok(list.unbind())
    }
}
