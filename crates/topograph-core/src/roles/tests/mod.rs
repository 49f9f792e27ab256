mod tests_role_set;
