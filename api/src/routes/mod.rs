pub mod car_verif;
