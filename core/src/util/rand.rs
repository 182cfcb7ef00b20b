use rand::distr::Alphanumeric;
use rand::Rng;

pub(crate) fn rand_alphabet_string(length: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(length).map(char::from).collect()
}
