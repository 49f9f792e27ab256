mod tests_port;
