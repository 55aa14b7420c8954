pub mod noise_testkit;
