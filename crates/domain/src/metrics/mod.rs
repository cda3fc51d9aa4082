pub mod impermanent_loss;
