pub mod repository;
pub mod routes;
pub mod seeder;
