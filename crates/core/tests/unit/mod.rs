/// End-to-end program scenarios run against a full `Simulator`.
pub mod end_to_end;
