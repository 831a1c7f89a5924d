mod common;
mod emi;
mod routing;
