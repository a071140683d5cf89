//! Shared fixtures for transformer tests


/// Header row matching the default column layout (10 columns)
pub const SAMPLE_HEADER: &str =
    "State,County,State code,County code,Year span,Measure name,Measure id,Release year,County rank,Raw value";

/// A small well-formed dataset with four data rows across two states
pub fn sample_csv() -> String {
    format!(
        "{}\n\
         New York,Albany,36,1,2014-2018,Adult obesity,11,2019,5,27.5\n\
         New York,Albany,36,1,2009-2013,Adult obesity,11,2014,7,25.1\n\
         Texas,Travis,48,453,2014-2018,Adult smoking,9,2019,12,14.2\n\
         Texas,Bexar,48,29,2014-2018,Adult obesity,11,2019,30,31.8\n",
        SAMPLE_HEADER
    )
}
