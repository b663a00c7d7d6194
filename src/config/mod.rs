pub mod multiscale;
