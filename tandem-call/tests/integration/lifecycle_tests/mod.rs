mod test_activation;
