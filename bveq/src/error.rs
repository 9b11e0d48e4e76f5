//! The crate's error type.

/// Error type for circuit I/O, configuration and equivalence checking.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum Error {
    /// Error reading or writing files.
    #[display("IO error: {_0}")]
    IO(std::io::Error),
    /// Error parsing a QASM file.
    #[display("Error parsing input circuit: {_0}")]
    CircuitParse(String),
    /// Error reading a configuration.
    #[display("Invalid configuration: {_0}")]
    Config(serde_json::Error),
    /// The worker pool could not be started.
    #[display("Could not build thread pool: {_0}")]
    ThreadPool(rayon::ThreadPoolBuildError),
    /// A reset was found but dynamic circuits are not transformed.
    #[display("Circuit resets qubit {qubit}; enable transform_dynamic_circuit to check it")]
    #[from(skip)]
    DynamicCircuit { qubit: usize },
    /// A gate acts on a qubit after that qubit was measured.
    #[display("Gate acts on qubit {qubit} after it was measured")]
    #[from(skip)]
    GateAfterMeasurement { qubit: usize },
    /// A gate names a qubit the circuit does not have.
    #[display("Gate acts on qubit {qubit}, but the circuit has {num_qubits} qubits")]
    #[from(skip)]
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    /// A gate the checkers have no semantics for.
    #[display("Unsupported gate: {_0}")]
    #[from(skip)]
    UnsupportedGate(String),
}

impl std::error::Error for Error {}
