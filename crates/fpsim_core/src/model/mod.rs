mod matrices;
mod methods;
mod people;
mod results;

pub use matrices::{
    AgeBracket, MatrixFamily, MatrixSet, RAW_SUM_TOL, ROW_SUM_TOL, SwitchingMatrix, vector_sum,
};
pub use methods::{Method, MethodId, MethodTable};
pub use people::{Person, PostpartumPhase, Pregnancy, Sex};
pub use results::SimulationResult;
