// common helpers 
pub mod algorithms; 
pub mod report; 
pub mod errors; 
pub mod config;
pub(crate) mod signs; 
pub(crate) mod domain; 

// algorithms 
pub mod bisection;
pub mod regula_falsi;
pub mod secant;
pub mod newton;
