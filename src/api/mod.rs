pub mod finsage;
